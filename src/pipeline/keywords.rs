//! Compiled keyword unions shared by the filter and the classifier.

use regex::{Regex, RegexBuilder};

use crate::error::AppError;

/// How keywords are delimited inside the compiled union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `\b(?:k1|k2|...)\b`.
    WordBoundary,
    /// Each keyword surrounded by single spaces, matched against the text
    /// padded the same way so hits at either end still count.
    Padded,
}

/// A case-insensitive union of literal keywords.
///
/// An empty keyword list compiles to a matcher that never matches.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    regex: Option<Regex>,
    mode: MatchMode,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S], mode: MatchMode) -> Result<Self, AppError> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty())
            .map(|k| match mode {
                MatchMode::WordBoundary => regex::escape(k),
                MatchMode::Padded => format!(" {} ", regex::escape(k)),
            })
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { regex: None, mode });
        }

        let pattern = match mode {
            MatchMode::WordBoundary => format!(r"\b(?:{})\b", alternatives.join("|")),
            MatchMode::Padded => format!("(?:{})", alternatives.join("|")),
        };
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

        Ok(Self {
            regex: Some(regex),
            mode,
        })
    }

    /// Word-boundary matcher, used for classification.
    pub fn word_boundary<S: AsRef<str>>(keywords: &[S]) -> Result<Self, AppError> {
        Self::new(keywords, MatchMode::WordBoundary)
    }

    /// Space-padded matcher, used for filtering.
    pub fn padded<S: AsRef<str>>(keywords: &[S]) -> Result<Self, AppError> {
        Self::new(keywords, MatchMode::Padded)
    }

    pub fn is_match(&self, text: &str) -> bool {
        let Some(regex) = &self.regex else {
            return false;
        };
        match self.mode {
            MatchMode::WordBoundary => regex.is_match(text),
            MatchMode::Padded => regex.is_match(&format!(" {} ", text)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }
}
