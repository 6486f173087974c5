//! One-shot search

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use typeahead_core::Renderer;

use crate::system_config;
use crate::util;

/// Search `term` once and print the rendered markup
///
/// No debouncing applies: the search runs immediately.
pub async fn run(term: &str, limit: Option<usize>, corpus: Option<PathBuf>) -> Result<()> {
    let mut config = system_config::load()?;
    if let Some(limit) = limit {
        config.provider.limit = limit;
        config.validate().context("Invalid --limit")?;
    }

    let renderer = Renderer::new(config.render.clone());

    // An empty term clears the display; there is nothing to ask for
    if term.is_empty() {
        println!("{}", renderer.render(&[], term));
        return Ok(());
    }

    let provider = util::build_provider(&config.provider, corpus.as_deref())?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.set_message(format!("Searching for {:?}", term));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let results = provider.search(term).await;
    spinner.finish_and_clear();

    let results = results.with_context(|| format!("Search for {:?} failed", term))?;
    info!("{} results for {:?}", results.len(), term);

    println!("{}", renderer.render(&results, term));
    Ok(())
}
