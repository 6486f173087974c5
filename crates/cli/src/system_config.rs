//! User configuration file
//!
//! Stored as TOML at `<config dir>/typeahead/config.toml`, or wherever
//! `TYPEAHEAD_CONFIG` points. A missing file means all defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use typeahead_core::RenderOptions;
use typeahead_provider::ProviderConfig;
use typeahead_widget::WidgetOptions;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "TYPEAHEAD_CONFIG";

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub debounce: DebounceConfig,
    pub provider: ProviderConfig,
    pub render: RenderOptions,
    pub widget: WidgetConfig,
}

/// `[debounce]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet window in milliseconds
    pub delay_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

/// `[widget]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Ignore responses overtaken by a newer search
    pub discard_stale: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self { discard_stale: true }
    }
}

/// A configuration value outside its accepted range
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be between {min} and {max} (got {value})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

fn check_range(key: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, min, max })
    }
}

fn check_non_empty(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Empty { key })
    } else {
        Ok(())
    }
}

impl SystemConfig {
    /// Check every value against its valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("debounce.delay_ms", self.debounce.delay_ms, 0, 10_000)?;
        check_range("provider.limit", self.provider.limit as u64, 1, 500)?;
        check_range("provider.timeout_secs", self.provider.timeout_secs, 1, 300)?;
        check_non_empty("provider.endpoint", &self.provider.endpoint)?;
        check_non_empty("provider.user_agent", &self.provider.user_agent)?;
        check_non_empty("render.highlight_class", &self.render.highlight_class)?;
        Ok(())
    }

    /// Widget options derived from the `[debounce]` and `[widget]` sections
    pub fn widget_options(&self) -> WidgetOptions {
        WidgetOptions {
            delay: Duration::from_millis(self.debounce.delay_ms),
            discard_stale: self.widget.discard_stale,
        }
    }
}

/// Location of the config file
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("typeahead").join("config.toml"))
}

/// Load and validate the config, falling back to defaults if absent
pub fn load() -> Result<SystemConfig> {
    let Some(path) = config_file_path() else {
        return Ok(SystemConfig::default());
    };
    if !path.exists() {
        return Ok(SystemConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    Ok(config)
}

/// Write the config file, creating its directory if needed
pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    Ok(())
}

/// Write a default config file unless one exists
pub fn init_if_missing() -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save(&SystemConfig::default())?;
    }
    Ok(())
}

/// Annotated example configuration
pub fn example_config() -> String {
    let defaults = SystemConfig::default();
    format!(
        r#"# Typeahead configuration

[debounce]
# Quiet window before a search fires (0-10000 ms)
delay_ms = {delay}

[provider]
# MediaWiki api.php endpoint
endpoint = "{endpoint}"
# Results per search (1-500)
limit = {limit}
# Request timeout (1-300 s)
timeout_secs = {timeout}
user_agent = "{agent}"

[render]
highlight_class = "{class}"
permalink_base = "{permalink}"
summary_suffix = "{suffix}"

[widget]
# Ignore responses overtaken by a newer search
discard_stale = {stale}
"#,
        delay = defaults.debounce.delay_ms,
        endpoint = defaults.provider.endpoint,
        limit = defaults.provider.limit,
        timeout = defaults.provider.timeout_secs,
        agent = defaults.provider.user_agent,
        class = defaults.render.highlight_class,
        permalink = defaults.render.permalink_base,
        suffix = defaults.render.summary_suffix,
        stale = defaults.widget.discard_stale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SystemConfig::default().validate().is_ok());
    }

    #[test]
    fn test_example_parses_to_defaults() {
        let parsed: SystemConfig = toml::from_str(&example_config()).unwrap();
        assert_eq!(parsed, SystemConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: SystemConfig = toml::from_str("[debounce]\ndelay_ms = 250\n").unwrap();
        assert_eq!(parsed.debounce.delay_ms, 250);
        assert_eq!(parsed.provider, ProviderConfig::default());
        assert!(parsed.widget.discard_stale);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = SystemConfig::default();
        config.provider.limit = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                key: "provider.limit",
                value: 0,
                min: 1,
                max: 500
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_class() {
        let mut config = SystemConfig::default();
        config.render.highlight_class = "  ".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Empty {
                key: "render.highlight_class"
            })
        );
    }

    #[test]
    fn test_widget_options() {
        let mut config = SystemConfig::default();
        config.debounce.delay_ms = 120;
        config.widget.discard_stale = false;

        let options = config.widget_options();
        assert_eq!(options.delay, Duration::from_millis(120));
        assert!(!options.discard_stale);
    }
}
