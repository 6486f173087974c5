//! Common utilities for integration tests

pub mod cli;

use std::path::{Path, PathBuf};

/// Small offline corpus written into a test directory
pub const CORPUS: &str = r#"[
  {"id": 25768, "title": "Rust (programming language)", "snippet": "<span class=\"searchmatch\">Rust</span> is a general-purpose programming language"},
  {"id": 26031, "title": "Rust", "snippet": "Iron oxide, commonly known as rust"},
  {"id": 4231, "title": "Python (programming language)", "snippet": "Python is a high-level language"}
]"#;

/// Write `CORPUS` to `dir/corpus.json` and return its path
pub fn write_corpus(dir: &Path) -> PathBuf {
    let path = dir.join("corpus.json");
    std::fs::write(&path, CORPUS).unwrap();
    path
}
