/// Identifier of the file picker on the hosting page.
pub const FILE_INPUT: &str = "fileInput";
/// Identifier of the container that receives the preview `<img>`.
pub const IMAGE_PREVIEW: &str = "imagePreview";
/// Identifier of the container that receives the prediction text.
pub const RESULT: &str = "result";

/// Selectors handed to every operation, so nothing looks elements up by a
/// fixed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elements {
    pub file_input:    String,
    pub image_preview: String,
    pub result:        String,
}

impl Default for Elements {
    fn default() -> Self {
        Elements {
            file_input:    FILE_INPUT.to_owned(),
            image_preview: IMAGE_PREVIEW.to_owned(),
            result:        RESULT.to_owned(),
        }
    }
}
