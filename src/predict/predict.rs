use tracing::error;

use crate::document::document::{lock, SharedDocument};
use crate::document::elements::Elements;
use crate::predict::client::PredictClient;
use crate::predict::error::PredictError;
use crate::predict::format::PREDICTION_ERROR_TEXT;

/// Alert raised when predict is triggered with nothing selected.
pub const NO_FILE_ALERT: &str = "Please select an image file first.";

/// How a predict call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    /// Nothing was selected; the user was alerted and nothing was sent.
    NoFile,
    /// The response was rendered into the result container.
    Rendered(String),
    /// The request or its decoding failed; the generic error text is shown.
    Failed,
}

/// Submits the first selected file and writes the outcome into the result
/// container.
///
/// Transport and decoding failures are logged and replaced by
/// `Error making prediction`; they are not returned. Only a document that
/// lacks the expected elements makes this return `Err`.
pub fn predict(
    doc: &SharedDocument,
    elements: &Elements,
    client: &PredictClient,
) -> Result<PredictOutcome, PredictError> {
    let file = lock(doc).first_file(&elements.file_input)?;

    let Some(file) = file else {
        lock(doc).alert(NO_FILE_ALERT);
        return Ok(PredictOutcome::NoFile);
    };

    match client.submit(&file) {
        Ok(prediction) => {
            let text = prediction.display_text();
            lock(doc).set_inner_text(&elements.result, text.clone())?;
            Ok(PredictOutcome::Rendered(text))
        }
        Err(e) => {
            error!(error = %e, url = %client.predict_url(), "prediction failed");
            lock(doc).set_inner_text(&elements.result, PREDICTION_ERROR_TEXT)?;
            Ok(PredictOutcome::Failed)
        }
    }
}
