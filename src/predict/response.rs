use serde_json::Value;

use crate::predict::error::PredictError;
use crate::predict::format::{result_text, value_to_number};

/// A decoded prediction response.
///
/// The endpoint promises `{ "class": string, "confidence": number }` but
/// nothing checks it; fields are kept as raw JSON and converted loosely when
/// displayed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prediction {
    pub class:      Option<Value>,
    pub confidence: Option<Value>,
}

impl Prediction {
    /// Parses a response body.
    ///
    /// Invalid JSON and a bare `null` are errors. Any other non-object body
    /// (array, string, number) parses to a prediction with no fields.
    pub fn from_json(body: &[u8]) -> Result<Prediction, PredictError> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Err(PredictError::NullBody),
            Value::Object(mut map) => Ok(Prediction {
                class:      map.remove("class"),
                confidence: map.remove("confidence"),
            }),
            _ => Ok(Prediction::default()),
        }
    }

    /// The label, when the endpoint sent one as a string.
    pub fn label(&self) -> Option<&str> {
        self.class.as_ref().and_then(Value::as_str)
    }

    /// Confidence as a fraction; NaN when absent or not numeric.
    pub fn confidence(&self) -> f64 {
        self.confidence.as_ref().map(value_to_number).unwrap_or(f64::NAN)
    }

    /// `Class: …, Confidence: …%`
    pub fn display_text(&self) -> String {
        result_text(self.class.as_ref(), self.confidence.as_ref())
    }
}
