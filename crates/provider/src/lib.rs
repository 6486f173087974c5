//! Search providers for Typeahead
//!
//! This crate provides:
//! - The `SearchProvider` seam used by the widget
//! - `WikipediaProvider`: the MediaWiki `list=search` API over HTTP
//! - `StaticProvider`: an in-memory corpus for offline use and tests

pub mod corpus;
pub mod error;
pub mod wikipedia;

// Re-exports
pub use corpus::StaticProvider;
pub use error::ProviderError;
pub use wikipedia::{ProviderConfig, WikipediaProvider};

use async_trait::async_trait;
use typeahead_core::SearchResult;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Something that can answer a search term with an ordered result list
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for `term`, which must be non-empty
    async fn search(&self, term: &str) -> Result<Vec<SearchResult>>;
}
