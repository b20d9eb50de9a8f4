//! Enrichment classifier: media source, stance, topic, and behavior.

use url::{Host, Url};

use crate::config::{KeywordConfig, TopicKeywords};
use crate::error::AppError;
use crate::models::{EnrichedStatement, PublicBehavior, RawStatement, StatementType, Topic, UrlRef};
use crate::pipeline::keywords::KeywordMatcher;

/// Media outlet name from a statement's URLs.
///
/// Takes the first URL, parses its host, and returns the second
/// dot-separated label (`www.example.com` → `example`). Returns `None` for
/// a missing or empty list, an unparseable URL, an IP host, or a host with
/// fewer than two labels.
pub fn extract_media_source(urls: Option<&[UrlRef]>) -> Option<String> {
    let first = urls?.first()?;
    let parsed = Url::parse(first.url.trim()).ok()?;
    let Some(Host::Domain(host)) = parsed.host() else {
        return None;
    };
    host.split('.')
        .nth(1)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
}

/// Behavior label implied by a statement type.
pub fn infer_behavior(statement_type: StatementType) -> PublicBehavior {
    PublicBehavior::from(statement_type)
}

fn topic_keywords(topics: &TopicKeywords, topic: Topic) -> &[String] {
    match topic {
        Topic::Lockdown => topics.lockdown.as_slice(),
        Topic::SocialDistancing => topics.social_distancing.as_slice(),
        Topic::Reopening => topics.reopening.as_slice(),
        Topic::Guidelines => topics.guidelines.as_slice(),
        Topic::Vaccination => topics.vaccination.as_slice(),
        Topic::General => &[],
    }
}

/// Keyword classifier with every keyword set compiled once.
///
/// Scan orders come from [`StatementType::PRIORITY`] and [`Topic::PRIORITY`].
#[derive(Debug, Clone)]
pub struct Classifier {
    stances: Vec<(StatementType, KeywordMatcher)>,
    topics: Vec<(Topic, KeywordMatcher)>,
}

impl Classifier {
    pub fn new(keywords: &KeywordConfig) -> Result<Self, AppError> {
        let stances = StatementType::PRIORITY
            .iter()
            .map(|&ty| {
                let list = match ty {
                    StatementType::Defiance => keywords.defiance.as_slice(),
                    StatementType::Compliance => keywords.compliance.as_slice(),
                    StatementType::Neutral => &[],
                };
                Ok((ty, KeywordMatcher::word_boundary(list)?))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let topics = Topic::PRIORITY
            .iter()
            .map(|&topic| {
                let list = topic_keywords(&keywords.topics, topic);
                Ok((topic, KeywordMatcher::word_boundary(list)?))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self { stances, topics })
    }

    /// First stance in priority order with a keyword hit, else `Neutral`.
    pub fn classify_statement(&self, text: &str) -> StatementType {
        self.stances
            .iter()
            .find(|(_, matcher)| matcher.is_match(text))
            .map(|(ty, _)| *ty)
            .unwrap_or(StatementType::Neutral)
    }

    /// First topic in priority order with a keyword hit, else `General`.
    pub fn tag_topic(&self, text: &str) -> Topic {
        self.topics
            .iter()
            .find(|(_, matcher)| matcher.is_match(text))
            .map(|(topic, _)| *topic)
            .unwrap_or(Topic::General)
    }

    pub fn enrich(&self, raw: RawStatement) -> EnrichedStatement {
        let full_text = raw.full_text();
        let media_source = extract_media_source(raw.urls.as_deref());
        let statement_type = self.classify_statement(&full_text);
        let topic = self.tag_topic(&full_text);

        EnrichedStatement {
            raw,
            full_text,
            media_source,
            statement_type,
            topic,
            public_behavior: infer_behavior(statement_type),
        }
    }
}
