//! Renders the hosting page from a `Document`.
//!
//! The page is a single HTML template (`client/assets/page.html`) with
//! `{{TOKEN}}` placeholders, loaded at compile time. Containers are written
//! as the document holds them; text content is escaped.

use classify_lens::document::document::html_escape;
use classify_lens::{Document, DocumentError, Elements};

const TEMPLATE: &str = include_str!("assets/page.html");

pub fn render_page(doc: &Document, elements: &Elements) -> Result<String, DocumentError> {
    let file_name = doc
        .first_file(&elements.file_input)?
        .map(|f| html_escape(&f.name))
        .unwrap_or_default();

    let preview = doc.inner_html(&elements.image_preview)?;
    let result = doc.inner_html(&elements.result)?;

    Ok(fill_template(TEMPLATE, |token| match token {
        "FILE_NAME"     => Some(file_name.as_str()),
        "IMAGE_PREVIEW" => Some(preview.as_str()),
        "RESULT"        => Some(result.as_str()),
        _               => None,
    }))
}

/// Substitutes each `{{TOKEN}}` of `template` in a single pass. Unknown
/// tokens are blanked; substituted values are never scanned again.
fn fill_template<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start..].find("}}") else { break };
        out.push_str(&rest[..start]);
        out.push_str(lookup(&rest[start + 2..start + len]).unwrap_or(""));
        rest = &rest[start + len + 2..];
    }
    out.push_str(rest);
    out
}
