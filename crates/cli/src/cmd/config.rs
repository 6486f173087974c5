//! Configuration management command
//!
//! Provides CLI interface to view and edit the configuration file.

use crate::system_config::{self, SystemConfig};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Every settable key, in display order
const KEYS: &[&str] = &[
    "debounce.delay_ms",
    "provider.endpoint",
    "provider.limit",
    "provider.timeout_secs",
    "provider.user_agent",
    "render.highlight_class",
    "render.permalink_base",
    "render.summary_suffix",
    "widget.discard_stale",
];

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Typeahead Configuration".bold());
    println!("{}: {}", "Location".dimmed(), config_path.display().dimmed());

    let mut section = "";
    for &key in KEYS {
        let (prefix, name) = key.split_once('.').unwrap_or(("", key));
        if prefix != section {
            section = prefix;
            println!("\n{}", format!("[{}]", section).yellow());
        }
        // KEYS only holds known keys
        let value = value_of(&config, key).unwrap_or_default();
        println!("  {} = {}", name.cyan(), value);
    }

    println!("\n{}", "Valid Ranges:".bold());
    println!("  debounce.delay_ms: 0-10,000");
    println!("  provider.limit: 1-500");
    println!("  provider.timeout_secs: 1-300");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;

    match value_of(&config, key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => anyhow::bail!(
            "Unknown config key: {}. Use 'typeahead config --list' to see available keys.",
            key
        ),
    }
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;

    match key {
        "debounce.delay_ms" => {
            config.debounce.delay_ms = value.parse()
                .context("Invalid value: must be a non-negative integer")?;
        }
        "provider.endpoint" => config.provider.endpoint = value.to_string(),
        "provider.limit" => {
            config.provider.limit = value.parse()
                .context("Invalid value: must be a positive integer")?;
        }
        "provider.timeout_secs" => {
            config.provider.timeout_secs = value.parse()
                .context("Invalid value: must be a positive integer")?;
        }
        "provider.user_agent" => config.provider.user_agent = value.to_string(),
        "render.highlight_class" => config.render.highlight_class = value.to_string(),
        "render.permalink_base" => config.render.permalink_base = value.to_string(),
        "render.summary_suffix" => config.render.summary_suffix = value.to_string(),
        "widget.discard_stale" => {
            config.widget.discard_stale = value.parse()
                .context("Invalid value: must be 'true' or 'false'")?;
        }
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'typeahead config --list' to see available keys.",
            key
        ),
    }

    // Validate before saving
    config.validate()
        .context("Invalid configuration value")?;

    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", system_config::example_config());
    Ok(())
}

fn value_of(config: &SystemConfig, key: &str) -> Option<String> {
    let value = match key {
        "debounce.delay_ms" => config.debounce.delay_ms.to_string(),
        "provider.endpoint" => config.provider.endpoint.clone(),
        "provider.limit" => config.provider.limit.to_string(),
        "provider.timeout_secs" => config.provider.timeout_secs.to_string(),
        "provider.user_agent" => config.provider.user_agent.clone(),
        "render.highlight_class" => config.render.highlight_class.clone(),
        "render.permalink_base" => config.render.permalink_base.clone(),
        "render.summary_suffix" => config.render.summary_suffix.clone(),
        "widget.discard_stale" => config.widget.discard_stale.to_string(),
        _ => return None,
    };
    Some(value)
}
