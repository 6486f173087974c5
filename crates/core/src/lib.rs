//! Core types and markup handling for Typeahead
//!
//! This crate provides:
//! - Search result records shared by providers and renderers
//! - Markup stripping and HTML escaping
//! - Case-insensitive term highlighting
//! - Result list rendering into display markup

pub mod markup;
pub mod render;
pub mod result;

// Re-exports
pub use markup::{highlight, highlight_with_class, strip_markup, Highlighter, DEFAULT_HIGHLIGHT_CLASS};
pub use render::{RenderOptions, Renderer};
pub use result::SearchResult;
