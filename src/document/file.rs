use std::path::Path;

/// A file chosen through a file input: its name, raw bytes, and media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name:       String,
    pub media_type: String,
    pub bytes:      Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = media_type_for(&name).to_owned();
        SelectedFile { name, media_type, bytes }
    }

    /// Reads a file from disk, keeping only its final path component as the name.
    pub fn from_path(path: &Path) -> std::io::Result<SelectedFile> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
            .to_owned();
        Ok(SelectedFile::new(name, bytes))
    }
}

/// Guesses a media type from the file extension, the way a browser labels
/// a picked file. Unknown extensions fall back to `application/octet-stream`.
pub fn media_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png"          => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp"          => "image/bmp",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        _              => "application/octet-stream",
    }
}
