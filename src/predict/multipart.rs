use rand::{distributions::Alphanumeric, Rng};

use crate::document::file::SelectedFile;

/// A multipart/form-data body under construction.
///
/// Parts are written in the order they are appended, each delimited by
/// `--<boundary>` and terminated by `--<boundary>--`.
#[derive(Debug, Clone)]
pub struct FormData {
    boundary: String,
    body:     Vec<u8>,
}

impl FormData {
    pub fn new() -> Self {
        FormData::with_boundary(random_boundary())
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        FormData { boundary: boundary.into(), body: Vec::new() }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Appends a file part carrying the file's name and media type.
    pub fn append_file(&mut self, field_name: &str, file: &SelectedFile) -> &mut Self {
        let headers = format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}",
            quote_escape(field_name),
            quote_escape(&file.name),
            file.media_type,
        );
        self.push_part(&headers, &file.bytes)
    }

    /// `Content-Type` header value announcing this body's boundary.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Closes the body and returns its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }

    fn push_part(&mut self, headers: &str, data: &[u8]) -> &mut Self {
        self.body.extend_from_slice(format!("--{}\r\n{}\r\n\r\n", self.boundary, headers).as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }
}

impl Default for FormData {
    fn default() -> Self {
        FormData::new()
    }
}

/// Boundary in the style browsers use: a fixed prefix plus 16 random
/// alphanumerics.
fn random_boundary() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("----ClassifyLensBoundary{}", suffix)
}

/// Percent-encodes the characters that would end or split a quoted header
/// parameter, the way browsers encode form field and file names. Everything
/// else, backslashes included, goes through unchanged.
fn quote_escape(s: &str) -> String {
    s.replace('"', "%22")
     .replace('\r', "%0D")
     .replace('\n', "%0A")
}
