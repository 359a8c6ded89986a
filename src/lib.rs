pub mod config;
pub mod document;
pub mod preview;
pub mod predict;

// Convenience re-exports
pub use config::client_config::{ClientConfig, ConfigError};
pub use document::document::{shared, Content, Document, DocumentError, SharedDocument};
pub use document::elements::Elements;
pub use document::file::SelectedFile;
pub use preview::bounds::{fit_within, MAX_PREVIEW_EDGE};
pub use preview::preview::preview_image;
pub use preview::render::{render_preview, PreviewError, PreviewImage};
pub use predict::client::PredictClient;
pub use predict::error::PredictError;
pub use predict::predict::{predict, PredictOutcome, NO_FILE_ALERT};
pub use predict::response::Prediction;
