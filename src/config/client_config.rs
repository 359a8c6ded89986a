use std::path::Path;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::preview::bounds::MAX_PREVIEW_EDGE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid base url '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("max_preview must be at least 1")]
    ZeroPreview,
}

/// Where the client sends requests and how large previews may be.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url:     String,
    pub predict_path: String,
    pub ping_path:    String,
    pub max_preview:  u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url:     "http://localhost:8000".to_owned(),
            predict_path: "/predict".to_owned(),
            ping_path:    "/ping".to_owned(),
            max_preview:  MAX_PREVIEW_EDGE,
        }
    }
}

impl ClientConfig {
    /// Defaults, overlaid with the JSON file at `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
        let Some(path) = path else {
            return Ok(ClientConfig::default());
        };
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: display.clone(), source })?;
        let cfg: ClientConfig = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::Parse { path: display, source })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base()?;
        if self.max_preview == 0 {
            return Err(ConfigError::ZeroPreview);
        }
        Ok(())
    }

    /// The base URL; only http and https are accepted.
    pub fn base(&self) -> Result<Url, ConfigError> {
        let bad = |reason: String| ConfigError::BaseUrl { url: self.base_url.clone(), reason };
        let url = Url::parse(&self.base_url).map_err(|e| bad(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(bad(format!("unsupported scheme '{}'", other))),
        }
    }

    /// `predict_path` resolved against the base URL the way a page resolves a
    /// relative link.
    pub fn predict_url(&self) -> Result<Url, ConfigError> {
        self.resolve(&self.predict_path)
    }

    pub fn ping_url(&self) -> Result<Url, ConfigError> {
        self.resolve(&self.ping_path)
    }

    fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
        self.base()?.join(path).map_err(|e| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}
