//! Display sinks
//!
//! A sink stands in for the page region that shows results. Every render
//! replaces its whole content; there is no incremental patching.

use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Destination for rendered markup
pub trait RenderSink: Send + Sync {
    /// Replace everything currently displayed with `markup`
    fn replace(&self, markup: String);
}

/// Keeps the current content and every replacement in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    history: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// What is displayed now
    pub fn content(&self) -> String {
        self.history.lock().last().cloned().unwrap_or_default()
    }

    /// Every replacement, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl RenderSink for MemorySink {
    fn replace(&self, markup: String) {
        self.history.lock().push(markup);
    }
}

/// Writes each replacement as one line to a writer (stdout in the CLI)
///
/// An empty line means the display was cleared. Line breaks inside the
/// markup are written as spaces, which HTML treats the same way.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> RenderSink for WriterSink<W> {
    fn replace(&self, markup: String) {
        let line = markup.replace("\r\n", " ").replace(['\n', '\r'], " ");
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line).and_then(|()| writer.flush()) {
            warn!("Failed to write rendered results: {}", e);
        }
    }
}

/// Overwrites a file with each replacement
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Display into the file at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Target file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderSink for FileSink {
    fn replace(&self, markup: String) {
        if let Err(e) = std::fs::write(&self.path, markup) {
            warn!("Failed to write results to {}: {}", self.path.display(), e);
        }
    }
}
