//! Interactive search-as-you-type
//!
//! Each stdin line is the full current value of the search box. Values are
//! debounced exactly as keystrokes would be, and every render replaces the
//! output (one line on stdout, or the whole `--out` file).

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use typeahead_core::Renderer;
use typeahead_widget::{FileSink, LineInput, RenderSink, SearchWidget, WriterSink};

use crate::system_config;
use crate::util;

/// Options for `typeahead watch`
#[derive(Debug, Default)]
pub struct WatchArgs {
    pub delay_ms: Option<u64>,
    pub corpus: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub keep_stale: bool,
}

/// Drive the widget from stdin until it closes
pub async fn run(args: WatchArgs) -> Result<()> {
    let mut config = system_config::load()?;
    if let Some(delay_ms) = args.delay_ms {
        config.debounce.delay_ms = delay_ms;
        config.validate().context("Invalid --delay-ms")?;
    }
    if args.keep_stale {
        config.widget.discard_stale = false;
    }

    let provider = util::build_provider(&config.provider, args.corpus.as_deref())?;
    let sink: Arc<dyn RenderSink> = match &args.out {
        Some(path) => Arc::new(FileSink::new(path)),
        None => Arc::new(WriterSink::new(std::io::stdout())),
    };

    let options = config.widget_options();
    info!(
        "Watching stdin (delay: {:?}, discard stale: {})",
        options.delay, options.discard_stale
    );

    let widget = SearchWidget::with_tokio(
        provider,
        sink,
        Renderer::new(config.render.clone()),
        options,
    )?;

    widget
        .run(LineInput::new(BufReader::new(tokio::io::stdin())))
        .await;

    info!("Input closed, all searches settled");
    Ok(())
}
