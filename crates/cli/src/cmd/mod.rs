//! CLI command implementations

pub mod config;
pub mod highlight;
pub mod search;
pub mod watch;
