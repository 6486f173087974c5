//! MediaWiki full-text search client

use crate::{ProviderError, Result, SearchProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use typeahead_core::SearchResult;

/// Default search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default number of results requested per search
pub const DEFAULT_LIMIT: usize = 10;

/// Provider settings (the `[provider]` config section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// `api.php` URL of the wiki
    pub endpoint: String,
    /// Results per search (`srlimit`)
    pub limit: usize,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            limit: DEFAULT_LIMIT,
            timeout_secs: 10,
            user_agent: format!("typeahead/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Searches a MediaWiki instance through `action=query&list=search`
#[derive(Debug, Clone)]
pub struct WikipediaProvider {
    client: Client,
    endpoint: String,
    limit: usize,
}

impl WikipediaProvider {
    /// Build a client from config
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            limit: config.limit,
        })
    }

    /// Endpoint this provider queries
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, term: &str) -> reqwest::RequestBuilder {
        let limit = self.limit.to_string();
        self.client.get(&self.endpoint).query(&[
            ("action", "query"),
            ("list", "search"),
            ("prop", "info|extracts"),
            ("inprop", "url"),
            ("utf8", ""),
            ("format", "json"),
            ("origin", "*"),
            ("srlimit", limit.as_str()),
            ("srsearch", term),
        ])
    }
}

#[async_trait]
impl SearchProvider for WikipediaProvider {
    async fn search(&self, term: &str) -> Result<Vec<SearchResult>> {
        if term.is_empty() {
            return Err(ProviderError::EmptyTerm);
        }

        let response = self.request(term).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let results = parse_response(&body)?;
        debug!("Search for {:?} returned {} results", term, results.len());
        Ok(results)
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    query: Option<QueryBlock>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct QueryBlock {
    #[serde(default)]
    search: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

/// Decode a `list=search` response body
fn parse_response(body: &str) -> Result<Vec<SearchResult>> {
    let response: ApiResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(ProviderError::Api {
            code: error.code,
            info: error.info,
        });
    }

    // A response without a query block is as malformed as unparseable JSON
    match response.query {
        Some(query) => Ok(query.search),
        None => Err(ProviderError::Decode(serde::de::Error::missing_field("query"))),
    }
}
