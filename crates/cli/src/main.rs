//! Typeahead CLI - typeahead command

use clap::{Parser, Subcommand};
use anyhow::Result;
use std::path::PathBuf;
use tracing::Level;

mod cmd;
mod system_config;
mod util;

/// Typeahead - debounced search-as-you-type against Wikipedia
#[derive(Parser)]
#[command(name = "typeahead")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once and print the rendered results
    Search {
        /// Search term
        term: String,
        /// Maximum number of results (default: from config)
        #[arg(long)]
        limit: Option<usize>,
        /// Search a local JSON corpus instead of the API
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Read search box values from stdin, one per line, and render as you type
    Watch {
        /// Quiet window in milliseconds (default: from config)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Search a local JSON corpus instead of the API
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Write results into this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Show every response even if a newer search overtook it
        #[arg(long)]
        keep_stale: bool,
    },
    /// Highlight a term in text
    Highlight {
        /// Text to highlight (markup is stripped first)
        text: String,
        /// Term to highlight
        term: String,
        /// CSS class for highlight markers (default: from config)
        #[arg(long)]
        class: Option<String>,
    },
    /// View or edit configuration
    Config {
        /// List all values
        #[arg(long)]
        list: bool,
        /// Print one value
        #[arg(long, value_name = "KEY")]
        get: Option<String>,
        /// Set one value
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,
        /// Print the config file path
        #[arg(long)]
        path: bool,
        /// With --path, create the file if missing
        #[arg(long, requires = "path")]
        create: bool,
        /// Print an annotated example config
        #[arg(long)]
        example: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for markup
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.command {
        Commands::Search { term, limit, corpus } => cmd::search::run(&term, limit, corpus).await,
        Commands::Watch { delay_ms, corpus, out, keep_stale } => {
            cmd::watch::run(cmd::watch::WatchArgs { delay_ms, corpus, out, keep_stale }).await
        }
        Commands::Highlight { text, term, class } => cmd::highlight::run(&text, &term, class).await,
        // --list is the default view, so the flag itself needs no branch
        Commands::Config { list: _, get, set, path, create, example } => {
            if let Some(key) = get {
                cmd::config::run_get(&key).await
            } else if let Some(pair) = set {
                match pair.as_slice() {
                    [key, value] => cmd::config::run_set(key, value).await,
                    _ => anyhow::bail!("--set takes a key and a value"),
                }
            } else if path {
                cmd::config::run_path(create).await
            } else if example {
                cmd::config::run_example().await
            } else {
                cmd::config::run_list().await
            }
        }
    }
}
