//! Search-as-you-type wiring for Typeahead
//!
//! This crate connects the pieces:
//! - `InputSource`: successive values of the search box
//! - `SearchWidget`: debounces input, queries the provider, renders results
//! - `RenderSink`: the display region, replaced wholesale on every render

pub mod input;
pub mod sink;
pub mod widget;

// Re-exports
pub use input::{ChannelInput, InputSource, LineInput};
pub use sink::{FileSink, MemorySink, RenderSink, WriterSink};
pub use widget::{SearchWidget, WidgetOptions};
