//! Result list rendering
//!
//! Turns an ordered result list plus the term that produced it into the
//! markup that replaces the display region.

use crate::markup::{strip_markup, Highlighter, DEFAULT_HIGHLIGHT_CLASS};
use crate::result::SearchResult;
use serde::{Deserialize, Serialize};

/// Default permalink prefix (Wikipedia page-id links)
pub const DEFAULT_PERMALINK_BASE: &str = "https://en.wikipedia.org/?curid=";

/// Default text appended to every summary
pub const DEFAULT_SUMMARY_SUFFIX: &str = "...";

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// CSS class of highlight markers
    pub highlight_class: String,
    /// Prefix joined with the result id to build each link
    pub permalink_base: String,
    /// Appended after each snippet
    pub summary_suffix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight_class: DEFAULT_HIGHLIGHT_CLASS.to_string(),
            permalink_base: DEFAULT_PERMALINK_BASE.to_string(),
            summary_suffix: DEFAULT_SUMMARY_SUFFIX.to_string(),
        }
    }
}

/// Stateless markup renderer
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Rendering options in use
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `results` for `term`
    ///
    /// An empty term renders nothing, which clears the display.
    pub fn render(&self, results: &[SearchResult], term: &str) -> String {
        if term.is_empty() {
            return String::new();
        }

        let highlighter = Highlighter::new(term, &self.options.highlight_class);
        let href_base = html_escape::encode_double_quoted_attribute(&self.options.permalink_base);
        let suffix = html_escape::encode_text(&self.options.summary_suffix);

        results
            .iter()
            .map(|result| {
                let title = highlighter.apply(&strip_markup(&result.title));
                let snippet = highlighter.apply(&strip_markup(&result.snippet));

                format!(
                    "<article><a href=\"{}{}\"><h2>{}</h2></a><div class=\"summary\">{}{}</div></article>",
                    href_base, result.id, title, snippet, suffix
                )
            })
            .collect()
    }
}
