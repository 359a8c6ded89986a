use tracing::debug;

use crate::document::document::{lock, SharedDocument};
use crate::document::elements::Elements;
use crate::preview::render::{render_preview, PreviewError, PreviewImage};

/// Shows a scaled copy of the first selected file in the preview container.
///
/// With nothing selected the container is emptied and `Ok(None)` returned.
/// A file that does not decode leaves the container as it was and the error
/// goes back to the caller. The document lock is released while the image is
/// decoded.
pub fn preview_image(
    doc: &SharedDocument,
    elements: &Elements,
    max_edge: u32,
) -> Result<Option<PreviewImage>, PreviewError> {
    let file = lock(doc).first_file(&elements.file_input)?;

    let file = match file {
        Some(f) => f,
        None => {
            lock(doc).set_inner_html(&elements.image_preview, "")?;
            return Ok(None);
        }
    };

    debug!(name = %file.name, bytes = file.bytes.len(), "rendering preview");
    let preview = render_preview(&file.bytes, max_edge)?;
    lock(doc).set_inner_html(&elements.image_preview, preview.to_html())?;
    Ok(Some(preview))
}
