//! Input event sources

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;
use tracing::warn;

/// Stream of "input changed" events, each carrying the full current value
#[async_trait]
pub trait InputSource: Send {
    /// Next input value, or `None` once the source is exhausted
    async fn next_input(&mut self) -> Option<String>;
}

/// One input value per line of a reader (stdin in the CLI)
pub struct LineInput<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> LineInput<R> {
    /// Read input values from `reader`
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> InputSource for LineInput<R> {
    async fn next_input(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(Some(line)) => Some(line.trim_end_matches('\r').to_string()),
            Ok(None) => None,
            Err(e) => {
                warn!("Input stream failed, stopping: {}", e);
                None
            }
        }
    }
}

/// Input values pushed through a channel
pub struct ChannelInput {
    rx: mpsc::Receiver<String>,
}

impl ChannelInput {
    /// Create a source and the sender that feeds it
    pub fn channel(capacity: usize) -> (mpsc::Sender<String>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { rx })
    }
}

#[async_trait]
impl InputSource for ChannelInput {
    async fn next_input(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}
