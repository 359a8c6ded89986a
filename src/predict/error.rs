use thiserror::Error;

use crate::config::client_config::ConfigError;
use crate::document::document::DocumentError;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response body is null")]
    NullBody,
    #[error(transparent)]
    Document(#[from] DocumentError),
}
