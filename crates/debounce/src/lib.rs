//! Debouncing for Typeahead
//!
//! This crate provides:
//! - `Debouncer`: collapses bursts of calls into one delayed invocation
//!   carrying the arguments of the last call
//! - The `Timer` seam with a tokio-backed timer and a manual virtual clock
//!   for deterministic tests

pub mod debounce;
pub mod timer;

// Re-exports
pub use debounce::{make_debounced, Debouncer, DEFAULT_DELAY};
pub use timer::{Job, ManualTimer, Timer, TimerHandle, TokioTimer};

/// Errors raised while wiring a debouncer to its runtime
#[derive(Debug, thiserror::Error)]
pub enum DebounceError {
    /// A tokio-backed component was created outside a tokio runtime
    #[error("no tokio runtime is available on this thread")]
    NoRuntime,
}
