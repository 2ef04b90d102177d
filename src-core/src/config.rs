//! TOML configuration for the front end.
//!
//! - `default_config()` - settings embedded at compile time
//! - `load_config(path)` - settings read from an explicit file
//! - `AppConfig::from_toml_str` - settings from an in-memory document

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Defaults embedded from `src-core/config/gradebook.toml`.
const DEFAULT_CONFIG: &str = include_str!("../config/gradebook.toml");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Backend origin. `None` means "same origin as the page".
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            log_level: default_log_level(),
        }
    }
}

fn default_locale() -> String {
    "ru".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("invalid gradebook config")?;
        if let Some(base) = &config.api.base_url {
            Url::parse(base).with_context(|| format!("invalid api.base_url '{}'", base))?;
        }
        Ok(config)
    }

    /// Resolve the backend origin, falling back to `page_origin` when unset.
    pub fn api_base(&self, page_origin: &str) -> Result<Url> {
        let raw = self.api.base_url.as_deref().unwrap_or(page_origin);
        Url::parse(raw).with_context(|| format!("invalid backend origin '{}'", raw))
    }
}

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    AppConfig::from_toml_str(&content)
}

/// The configuration compiled into the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a build-time bug).
pub fn default_config() -> AppConfig {
    AppConfig::from_toml_str(DEFAULT_CONFIG).expect("embedded gradebook.toml must be valid TOML")
}
