//! Markup stripping, escaping and term highlighting
//!
//! Provider text is untrusted. It is always reduced to plain text
//! (`strip_markup`) and then escaped segment by segment while highlight
//! markers are inserted, so the markers are the only markup in the output.

use regex::{Regex, RegexBuilder};
use scraper::Html;
use tracing::warn;

/// CSS class applied to highlight markers when none is configured
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "highlight";

/// Reduce an HTML fragment to plain text
///
/// The fragment is parsed as HTML, so comments, declarations and quoted
/// attribute values are handled the way a browser would. Only text nodes
/// survive, with character references already decoded. A `<` that cannot
/// open a tag stays text.
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect()
}

/// Highlight every occurrence of `term` in `text` with the default class
pub fn highlight(text: &str, term: &str) -> String {
    highlight_with_class(text, term, DEFAULT_HIGHLIGHT_CLASS)
}

/// Highlight every occurrence of `term` in `text` with the given class
pub fn highlight_with_class(text: &str, term: &str, class: &str) -> String {
    Highlighter::new(term, class).apply(text)
}

/// Compiled case-insensitive matcher for one search term
///
/// The term is matched literally; pattern metacharacters have no meaning.
/// Build once per render and apply to every field.
#[derive(Debug, Clone)]
pub struct Highlighter {
    /// `None` for an empty term (nothing to highlight)
    pattern: Option<Regex>,
    /// Pre-rendered opening marker
    open_tag: String,
}

impl Highlighter {
    /// Compile a highlighter for `term`
    pub fn new(term: &str, class: &str) -> Self {
        let pattern = if term.is_empty() {
            None
        } else {
            match RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
            {
                Ok(re) => Some(re),
                Err(e) => {
                    // Only reachable for terms beyond the regex size limit
                    warn!("Highlighting disabled for term of {} bytes: {}", term.len(), e);
                    None
                }
            }
        };

        Self {
            pattern,
            open_tag: format!(
                "<span class=\"{}\">",
                html_escape::encode_double_quoted_attribute(class)
            ),
        }
    }

    /// Escape `text` and wrap each match in a marker, keeping the original casing
    pub fn apply(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return html_escape::encode_text(text).into_owned();
        };

        let mut out = String::with_capacity(text.len() + 32);
        let mut last = 0;

        for m in pattern.find_iter(text) {
            out.push_str(&html_escape::encode_text(&text[last..m.start()]));
            out.push_str(&self.open_tag);
            out.push_str(&html_escape::encode_text(m.as_str()));
            out.push_str("</span>");
            last = m.end();
        }
        out.push_str(&html_escape::encode_text(&text[last..]));

        out
    }
}
