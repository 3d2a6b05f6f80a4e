//! Configuration management for the loader spinner
//!
//! Supports configuration via:
//! 1. Config file (~/.config/http-loader/config.toml)
//! 2. Environment variables (HTTP_LOADER_STYLE, HTTP_LOADER_DEBOUNCE_MS, etc.)
//! 3. The [`SpinnerBuilder`] API (overrides file/env settings)

use crate::spinner::{Spinner, SpinnerBuilder, SpinnerStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Spinner display settings
    pub spinner: SpinnerSettings,

    /// Request tracking settings
    pub tracking: TrackingSettings,
}

/// Spinner display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerSettings {
    /// Built-in graphic to draw ("none" draws nothing)
    pub style: SpinnerStyle,

    /// Free-form color token for the graphic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// Quiet window, in milliseconds, applied before show/hide
    pub debounce_delay_ms: u64,
}

impl Default for SpinnerSettings {
    fn default() -> Self {
        Self {
            style: SpinnerStyle::default(),
            background_color: None,
            debounce_delay_ms: 0,
        }
    }
}

/// Request tracking settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingSettings {
    /// URL patterns whose requests never affect the spinner.
    ///
    /// Must be an array of strings; any other shape fails parsing, and a
    /// config that does not parse registers zero patterns.
    pub filtered_url_patterns: Vec<String>,
}

impl LoaderConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("http-loader")
            .join("config.toml")
    }

    /// Load config from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load config from a specific path; a missing file yields defaults
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default().with_env_overrides());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: LoaderConfig = toml::from_str(&content)?;

        Ok(config.with_env_overrides())
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(name) = std::env::var("HTTP_LOADER_STYLE") {
            if let Some(style) = SpinnerStyle::from_name(&name) {
                self.spinner.style = style;
            }
        }
        if let Ok(color) = std::env::var("HTTP_LOADER_BACKGROUND_COLOR") {
            self.spinner.background_color = Some(color);
        }
        if let Ok(ms) = std::env::var("HTTP_LOADER_DEBOUNCE_MS") {
            if let Ok(ms) = ms.parse() {
                self.spinner.debounce_delay_ms = ms;
            }
        }

        self
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Apply this config to a widget builder.
    pub fn builder(&self) -> SpinnerBuilder {
        let mut builder = Spinner::builder()
            .style(self.spinner.style)
            .debounce_delay(Duration::from_millis(self.spinner.debounce_delay_ms))
            .filtered_url_patterns(self.tracking.filtered_url_patterns.iter().cloned());

        if let Some(color) = &self.spinner.background_color {
            builder = builder.background_color(color.clone());
        }

        builder
    }

    /// Generate example config content
    pub fn example() -> String {
        toml::to_string_pretty(&LoaderConfig::default()).unwrap_or_default()
    }
}
