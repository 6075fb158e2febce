//! Client configuration: base url and reserved API key.
//!
//! Values come from `Default`, the `ENERGY_CHARTS_*` environment variables,
//! or a TOML file.

use std::{env, fs, path::Path};

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.energy-charts.info";

/// Where to reach the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Reserved; the public API does not take a key and none is sent.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: None,
        }
        .normalized()
    }

    /// Read `ENERGY_CHARTS_BASE_URL` and `ENERGY_CHARTS_API_KEY`.
    pub fn from_env() -> Self {
        let base_url = env::var("ENERGY_CHARTS_BASE_URL").unwrap_or_else(|_| default_base_url());
        let api_key = env::var("ENERGY_CHARTS_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        Self { base_url, api_key }.normalized()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: ClientConfig = toml::from_str(contents)?;
        Ok(cfg.normalized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self
    }
}
