//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use typeahead_provider::{ProviderConfig, SearchProvider, StaticProvider, WikipediaProvider};

/// Build the provider a command should use
///
/// A corpus file selects the offline `StaticProvider`; otherwise the
/// configured MediaWiki endpoint is queried.
pub fn build_provider(config: &ProviderConfig, corpus: Option<&Path>) -> Result<Arc<dyn SearchProvider>> {
    match corpus {
        Some(path) => {
            let provider = StaticProvider::from_json_file(path)
                .with_context(|| format!("Failed to load corpus {}", path.display()))?
                .with_limit(config.limit);
            Ok(Arc::new(provider))
        }
        None => {
            let provider = WikipediaProvider::new(config)
                .context("Failed to build HTTP client")?;
            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_corpus_provider_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(
            &path,
            r#"[{"id":1,"title":"Rust"},{"id":2,"title":"Rust Belt"},{"id":3,"title":"Rusty"}]"#,
        )
        .unwrap();

        let config = ProviderConfig {
            limit: 2,
            ..ProviderConfig::default()
        };
        let provider = build_provider(&config, Some(&path)).unwrap();

        assert_eq!(provider.search("rust").await.unwrap().len(), 2);
    }

    #[test]
    fn test_missing_corpus_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_provider(&ProviderConfig::default(), Some(&dir.path().join("none.json")));
        assert!(result.is_err());
    }
}
