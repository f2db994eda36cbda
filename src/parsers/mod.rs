pub mod html;


use crate::results::{Heading, MetaTag, ResourceCounts};

/// How a response body should be treated, judged from its Content-Type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// HTML or XHTML markup
    Html,
    /// Some other textual format, parsed best-effort as HTML
    Text,
    /// Binary or otherwise non-markup content
    Unparseable,
}

impl ContentKind {
    /// Classify a Content-Type header value. A missing header is assumed to be HTML.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            ::log::debug!("No content type, assuming HTML");
            return ContentKind::Html;
        };

        let mime = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if mime.is_empty() || mime.contains("html") {
            ContentKind::Html
        } else if mime.starts_with("text/") || mime.contains("xml") {
            ContentKind::Text
        } else {
            ::log::debug!("Classifying '{}' as unparseable", mime);
            ContentKind::Unparseable
        }
    }
}

/// Everything extracted from one HTML document, before link resolution
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    /// Raw href of `<link rel="canonical">`
    pub canonical_href: Option<String>,
    /// Raw href of `<base>`
    pub base_href: Option<String>,
    pub meta_tags: Vec<MetaTag>,
    pub headings: Vec<Heading>,
    /// Raw href values of every anchor, in document order
    pub hrefs: Vec<String>,
    pub resources: ResourceCounts,
    /// Whitespace-collapsed visible text of every p, div and section element
    pub text_blocks: Vec<String>,
}
