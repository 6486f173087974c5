//! Search result records

use serde::{Deserialize, Serialize};

/// A single search hit as returned by a provider
///
/// `title` and `snippet` are raw provider text and may contain markup;
/// they are only made safe for display by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Provider-side identifier (Wikipedia `pageid`)
    #[serde(alias = "pageid")]
    pub id: u64,
    /// Page title
    pub title: String,
    /// Excerpt around the match
    #[serde(default)]
    pub snippet: String,
}

impl SearchResult {
    /// Create a new result record
    pub fn new(id: u64, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            snippet: snippet.into(),
        }
    }

    /// Build the permalink for this result from a base such as
    /// `https://en.wikipedia.org/?curid=`
    pub fn permalink(&self, base: &str) -> String {
        format!("{}{}", base, self.id)
    }
}
