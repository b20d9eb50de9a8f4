//! Statement records flowing through the pipeline.

use serde::{Deserialize, Serialize};

use super::{PublicBehavior, StatementType, Topic};

/// A URL attached to a statement in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

/// One line of the input corpus: an extracted subject-verb-object statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawStatement {
    /// Text preceding the verb (usually the subject).
    #[serde(default)]
    pub pre: String,
    #[serde(default)]
    pub verb: String,
    /// Text following the verb (usually the object).
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub date: Option<String>,
    /// Source URLs; `null` and a missing field both deserialize to `None`.
    #[serde(default)]
    pub urls: Option<Vec<UrlRef>>,
}

impl RawStatement {
    /// The three free-text fields, in corpus order.
    pub fn text_fields(&self) -> [&str; 3] {
        [&self.pre, &self.verb, &self.post]
    }

    /// `pre verb post` joined by single spaces, skipping empty parts.
    pub fn full_text(&self) -> String {
        self.text_fields()
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A statement after classification. Built once by the classifier and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedStatement {
    #[serde(flatten)]
    pub raw: RawStatement,
    pub full_text: String,
    pub media_source: Option<String>,
    pub statement_type: StatementType,
    pub topic: Topic,
    pub public_behavior: PublicBehavior,
}

/// Which attributes identify a `Statement` node when merging into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementIdentity {
    /// `{text, statement_type}`: identical wording collapses into one node
    /// regardless of date or source.
    #[default]
    Text,
    /// `{text, statement_type, date, media_source}`: each dated, sourced
    /// occurrence is its own node.
    Occurrence,
}
