//! Provider error type

use std::path::PathBuf;

/// Why a search could not produce results
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Providers are never asked about an empty term
    #[error("search term is empty")]
    EmptyTerm,

    /// Transport-level failure (connect, timeout, TLS)
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("search API returned HTTP {0}")]
    Status(u16),

    /// Response body was not the expected JSON
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered with an error object
    #[error("search API error {code}: {info}")]
    Api {
        /// Machine-readable code
        code: String,
        /// Human-readable description
        info: String,
    },

    /// Static corpus file could not be read
    #[error("failed to read corpus {}: {source}", path.display())]
    Corpus {
        /// Corpus location
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}
