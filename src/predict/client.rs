use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use tracing::{debug, warn};

use crate::config::client_config::ClientConfig;
use crate::document::file::SelectedFile;
use crate::predict::error::PredictError;
use crate::predict::multipart::FormData;
use crate::predict::response::Prediction;

/// Multipart field the endpoint reads the upload from.
pub const FILE_FIELD: &str = "file";

/// Blocking client for the prediction endpoint.
///
/// One request per call. Requests are never retried and never time out.
#[derive(Debug, Clone)]
pub struct PredictClient {
    http:        Client,
    predict_url: Url,
    ping_url:    Url,
}

impl PredictClient {
    pub fn new(config: &ClientConfig) -> Result<PredictClient, PredictError> {
        let http = Client::builder()
            .timeout(None)
            .build()
            .map_err(PredictError::Client)?;
        Ok(PredictClient {
            http,
            predict_url: config.predict_url()?,
            ping_url:    config.ping_url()?,
        })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    /// Uploads `file` under the `file` field and decodes the JSON reply.
    ///
    /// The HTTP status is logged but not acted on: an error status with a
    /// JSON body decodes like any other body.
    pub fn submit(&self, file: &SelectedFile) -> Result<Prediction, PredictError> {
        let mut form = FormData::new();
        form.append_file(FILE_FIELD, file);
        let content_type = form.content_type();
        let body = form.finish();

        debug!(url = %self.predict_url, name = %file.name, bytes = body.len(), "submitting image");
        let transport = |source| PredictError::Transport { url: self.predict_url.to_string(), source };

        let response = self.http
            .post(self.predict_url.clone())
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %self.predict_url, "prediction endpoint returned an error status");
        }

        let bytes = response.bytes().map_err(transport)?;
        let prediction = Prediction::from_json(&bytes)?;
        debug!(label = ?prediction.label(), confidence = prediction.confidence(), "prediction decoded");
        Ok(prediction)
    }

    /// Liveness probe. Returns the decoded JSON string, or the raw body when
    /// the server answers with something else.
    pub fn ping(&self) -> Result<String, PredictError> {
        let transport = |source| PredictError::Transport { url: self.ping_url.to_string(), source };
        let text = self.http
            .get(self.ping_url.clone())
            .send()
            .and_then(|r| r.text())
            .map_err(transport)?;
        Ok(serde_json::from_str::<String>(&text).unwrap_or(text))
    }
}
