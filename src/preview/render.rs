//! Image preprocessing for the preview area.
//!
//! Decodes uploaded bytes (PNG/JPEG/BMP/GIF), shrinks them into the preview
//! box, and re-encodes the result as a PNG data URL ready for an `<img>` tag.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, GenericImageView, ImageOutputFormat};
use thiserror::Error;
use tracing::debug;

use crate::document::document::{html_escape, DocumentError};
use crate::preview::bounds::fit_within;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("could not encode preview: {0}")]
    Encode(#[source] image::ImageError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// A scaled preview, already encoded for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width:    u32,
    pub height:   u32,
    pub data_url: String,
}

impl PreviewImage {
    pub fn to_html(&self) -> String {
        format!(r#"<img src="{}" alt="Uploaded Image">"#, html_escape(&self.data_url))
    }
}

/// Decodes image bytes, scales them to fit `max_edge × max_edge`, and
/// returns the PNG re-encoding as a data URL.
pub fn render_preview(bytes: &[u8], max_edge: u32) -> Result<PreviewImage, PreviewError> {
    let img = image::load_from_memory(bytes).map_err(PreviewError::Decode)?;
    let (src_w, src_h) = img.dimensions();
    let (width, height) = fit_within(src_w, src_h, max_edge);
    debug!(src_w, src_h, width, height, "scaling preview");

    let scaled = if (width, height) == (src_w, src_h) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    let mut png = Cursor::new(Vec::new());
    scaled
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(PreviewError::Encode)?;

    Ok(PreviewImage {
        width,
        height,
        data_url: png_data_url(png.get_ref()),
    })
}

pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}
