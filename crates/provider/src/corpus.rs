//! In-memory search over a fixed set of records

use crate::{ProviderError, Result, SearchProvider};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;
use typeahead_core::{strip_markup, SearchResult};

/// Serves searches from a fixed corpus
///
/// A record matches when its title or snippet (as plain text) contains the
/// term case-insensitively. Matches keep corpus order.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    records: Vec<SearchResult>,
    limit: usize,
}

impl StaticProvider {
    /// Create a provider over `records` with no result limit
    pub fn new(records: Vec<SearchResult>) -> Self {
        Self {
            records,
            limit: usize::MAX,
        }
    }

    /// Cap the number of results per search
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Load a JSON array of records (`id`/`pageid`, `title`, `snippet`)
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| ProviderError::Corpus {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<SearchResult> = serde_json::from_str(&data)?;
        debug!("Loaded {} corpus records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    /// Number of records in the corpus
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SearchProvider for StaticProvider {
    async fn search(&self, term: &str) -> Result<Vec<SearchResult>> {
        if term.is_empty() {
            return Err(ProviderError::EmptyTerm);
        }

        let needle = term.to_lowercase();
        let matches = self
            .records
            .iter()
            .filter(|record| {
                strip_markup(&record.title).to_lowercase().contains(&needle)
                    || strip_markup(&record.snippet).to_lowercase().contains(&needle)
            })
            .take(self.limit)
            .cloned()
            .collect();

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> StaticProvider {
        StaticProvider::new(vec![
            SearchResult::new(1, "Rust (programming language)", "Memory safety without GC"),
            SearchResult::new(2, "Iron oxide", "Commonly called <b>rust</b>"),
            SearchResult::new(3, "Go (programming language)", "Garbage collected"),
        ])
    }

    #[tokio::test]
    async fn test_matches_title_and_snippet_case_insensitively() {
        let results = corpus().search("RUST").await.unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_markup_does_not_match() {
        // "<b>" only exists as markup in record 2
        let results = corpus().search("<b>").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_limit() {
        let results = corpus().with_limit(1).search("language").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[tokio::test]
    async fn test_empty_term_rejected() {
        assert!(matches!(corpus().search("").await, Err(ProviderError::EmptyTerm)));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(
            &path,
            r#"[{"pageid": 10, "title": "Ten", "snippet": "x"}, {"id": 11, "title": "Eleven"}]"#,
        )
        .unwrap();

        let provider = StaticProvider::from_json_file(&path).unwrap();
        assert_eq!(provider.len(), 2);
    }

    #[test]
    fn test_from_json_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = StaticProvider::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ProviderError::Corpus { .. }));
    }

    #[test]
    fn test_from_json_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, "{ not an array").unwrap();

        let err = StaticProvider::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
