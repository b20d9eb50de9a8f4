//! Keyword pre-filter applied to raw statements.

use crate::error::AppError;
use crate::models::RawStatement;
use crate::pipeline::keywords::KeywordMatcher;
use crate::pipeline::reader::Chunk;

/// Keeps statements whose `pre`, `verb`, or `post` contains any keyword.
///
/// Keywords are space-padded to approximate whole-word matching and the
/// comparison is case-insensitive. Stateless and `Sync`, so one instance is
/// shared by every worker.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    matcher: KeywordMatcher,
}

impl KeywordFilter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, AppError> {
        Ok(Self {
            matcher: KeywordMatcher::padded(keywords)?,
        })
    }

    pub fn matches(&self, row: &RawStatement) -> bool {
        row.text_fields()
            .iter()
            .any(|field| self.matcher.is_match(field))
    }

    /// Filter one chunk, preserving row order.
    pub fn process_chunk(&self, chunk: Chunk) -> Chunk {
        let before = chunk.rows.len();
        let rows: Vec<RawStatement> = chunk
            .rows
            .into_iter()
            .filter(|row| self.matches(row))
            .collect();
        tracing::debug!(chunk = chunk.index, before, kept = rows.len(), "Filtered chunk");

        Chunk {
            index: chunk.index,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(pre: &str, verb: &str, post: &str) -> RawStatement {
        RawStatement {
            pre: pre.into(),
            verb: verb.into(),
            post: post.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_any_text_field() {
        let filter = KeywordFilter::new(&["lockdown", "curfew"]).unwrap();
        assert!(filter.matches(&stmt("officials", "announced", "a new lockdown curfew")));
        assert!(filter.matches(&stmt("Lockdown protesters", "gathered", "downtown")));
        assert!(!filter.matches(&stmt("officials", "announced", "a budget")));
    }

    #[test]
    fn test_partial_words_do_not_match() {
        let filter = KeywordFilter::new(&["mask"]).unwrap();
        assert!(!filter.matches(&stmt("people", "bought", "masked balls")));
        assert!(filter.matches(&stmt("people", "wear", "a mask outdoors")));
    }

    #[test]
    fn test_process_chunk_preserves_order_and_index() {
        let filter = KeywordFilter::new(&["vaccine"]).unwrap();
        let chunk = Chunk {
            index: 7,
            rows: vec![
                stmt("a", "got", "the vaccine"),
                stmt("b", "ate", "lunch"),
                stmt("c", "refused", "the vaccine"),
            ],
        };

        let out = filter.process_chunk(chunk);
        assert_eq!(out.index, 7);
        let pres: Vec<&str> = out.rows.iter().map(|r| r.pre.as_str()).collect();
        assert_eq!(pres, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_keyword_list_keeps_nothing() {
        let filter = KeywordFilter::new::<&str>(&[]).unwrap();
        assert!(!filter.matches(&stmt("lockdown", "lockdown", "lockdown")));
    }
}
