use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::document::elements::{FILE_INPUT, IMAGE_PREVIEW, RESULT};
use crate::document::file::SelectedFile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("no element with id '{0}'")]
    MissingElement(String),
    #[error("element '{id}' is not a {expected}")]
    WrongKind { id: String, expected: &'static str },
}

/// What a container currently shows. Text set through `set_inner_text` is
/// kept apart from markup so it is escaped when the page is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Html(String),
    Text(String),
}

impl Default for Content {
    fn default() -> Self {
        Content::Html(String::new())
    }
}

#[derive(Debug, Clone)]
enum Node {
    FileInput { files: Vec<SelectedFile> },
    Container { content: Content },
}

/// In-memory stand-in for the hosting page.
///
/// Holds file inputs and containers keyed by id, plus every alert raised
/// against it in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes:  BTreeMap<String, Node>,
    alerts: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    /// The page layout the preview and predict operations expect.
    pub fn standard() -> Self {
        let mut doc = Document::new();
        doc.insert_file_input(FILE_INPUT);
        doc.insert_container(IMAGE_PREVIEW);
        doc.insert_container(RESULT);
        doc
    }

    pub fn insert_file_input(&mut self, id: &str) {
        self.nodes.insert(id.to_owned(), Node::FileInput { files: Vec::new() });
    }

    pub fn insert_container(&mut self, id: &str) {
        self.nodes.insert(id.to_owned(), Node::Container { content: Content::default() });
    }

    /// Replaces the selection of a file input.
    pub fn select_files(&mut self, id: &str, selection: Vec<SelectedFile>) -> Result<(), DocumentError> {
        match self.node_mut(id)? {
            Node::FileInput { files } => {
                *files = selection;
                Ok(())
            }
            Node::Container { .. } => Err(wrong_kind(id, "file input")),
        }
    }

    /// Returns a copy of the first selected file, if any.
    pub fn first_file(&self, id: &str) -> Result<Option<SelectedFile>, DocumentError> {
        match self.node(id)? {
            Node::FileInput { files } => Ok(files.first().cloned()),
            Node::Container { .. } => Err(wrong_kind(id, "file input")),
        }
    }

    pub fn set_inner_html(&mut self, id: &str, html: impl Into<String>) -> Result<(), DocumentError> {
        *self.content_mut(id)? = Content::Html(html.into());
        Ok(())
    }

    pub fn set_inner_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), DocumentError> {
        *self.content_mut(id)? = Content::Text(text.into());
        Ok(())
    }

    pub fn content(&self, id: &str) -> Result<&Content, DocumentError> {
        match self.node(id)? {
            Node::Container { content } => Ok(content),
            Node::FileInput { .. } => Err(wrong_kind(id, "container")),
        }
    }

    /// Markup of a container; text content comes back escaped.
    pub fn inner_html(&self, id: &str) -> Result<String, DocumentError> {
        Ok(match self.content(id)? {
            Content::Html(html) => html.clone(),
            Content::Text(text) => html_escape(text),
        })
    }

    /// The raw stored string of a container, markup or text alike.
    pub fn text_content(&self, id: &str) -> Result<&str, DocumentError> {
        Ok(match self.content(id)? {
            Content::Html(s) | Content::Text(s) => s.as_str(),
        })
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Removes and returns all pending alerts.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn node(&self, id: &str) -> Result<&Node, DocumentError> {
        self.nodes.get(id).ok_or_else(|| DocumentError::MissingElement(id.to_owned()))
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node, DocumentError> {
        self.nodes.get_mut(id).ok_or_else(|| DocumentError::MissingElement(id.to_owned()))
    }

    fn content_mut(&mut self, id: &str) -> Result<&mut Content, DocumentError> {
        match self.node_mut(id)? {
            Node::Container { content } => Ok(content),
            Node::FileInput { .. } => Err(wrong_kind(id, "container")),
        }
    }
}

fn wrong_kind(id: &str, expected: &'static str) -> DocumentError {
    DocumentError::WrongKind { id: id.to_owned(), expected }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}

/// Shared document type, an `Arc<Mutex<Document>>` handed to each operation.
pub type SharedDocument = Arc<Mutex<Document>>;

pub fn shared(doc: Document) -> SharedDocument {
    Arc::new(Mutex::new(doc))
}

/// Locks the document. A writer that panicked leaves whole values behind, so
/// a poisoned lock is still usable.
pub fn lock(doc: &SharedDocument) -> MutexGuard<'_, Document> {
    doc.lock().unwrap_or_else(PoisonError::into_inner)
}
