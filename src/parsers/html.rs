use crate::parsers::ParsedDocument;
use crate::results::{Heading, MetaTag, ResourceCounts};
use crate::utils::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("meta[content]"));
static HTML_LANG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("html[lang]"));
static BASE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("base[href]"));
static LINK_REL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("link[rel]"));
static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector("h1, h2, h3, h4, h5, h6"));
static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("script"));
static BLOCK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("p, div, section"));

// Selectors are compile-time constants; a failure here is a programming error.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector '{}': {}", css, e))
}

/// Parses an HTML document and extracts the report fields.
///
/// Parsing is lenient: malformed or empty markup yields empty fields, never an error.
pub fn parse(html: &str) -> ParsedDocument {
    let doc = Html::parse_document(html);

    let parsed = ParsedDocument {
        title: extract_title(&doc),
        description: extract_description(&doc),
        language: first_attr(&doc, &HTML_LANG_SELECTOR, "lang"),
        canonical_href: extract_link_rel(&doc, "canonical"),
        base_href: first_attr(&doc, &BASE_SELECTOR, "href"),
        meta_tags: extract_meta_tags(&doc),
        headings: extract_headings(&doc),
        hrefs: extract_hrefs(&doc),
        resources: count_resources(&doc),
        text_blocks: extract_text_blocks(&doc),
    };

    ::log::debug!(
        "HTML parser found {} meta tags, {} headings, {} links, {} text blocks",
        parsed.meta_tags.len(),
        parsed.headings.len(),
        parsed.hrefs.len(),
        parsed.text_blocks.len()
    );

    parsed
}

/// Text of the first `<title>`, or None when absent or blank
pub fn extract_title(doc: &Html) -> Option<String> {
    doc.select(&TITLE_SELECTOR)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

/// Content of the first `<meta name="description">`
pub fn extract_description(doc: &Html) -> Option<String> {
    doc.select(&META_SELECTOR)
        .filter(|el| {
            el.value()
                .attr("name")
                .is_some_and(|n| n.trim().eq_ignore_ascii_case("description"))
        })
        .filter_map(|el| el.value().attr("content"))
        .map(collapse_whitespace)
        .find(|d| !d.is_empty())
}

/// Every meta tag keyed by name, property or http-equiv, in document order
pub fn extract_meta_tags(doc: &Html) -> Vec<MetaTag> {
    doc.select(&META_SELECTOR)
        .filter_map(|el| {
            let attrs = el.value();
            let name = attrs
                .attr("name")
                .or_else(|| attrs.attr("property"))
                .or_else(|| attrs.attr("http-equiv"))?
                .trim();
            if name.is_empty() {
                return None;
            }
            Some(MetaTag {
                name: name.to_string(),
                content: attrs.attr("content").unwrap_or("").trim().to_string(),
            })
        })
        .collect()
}

/// Non-empty h1..h6 headings in document order
pub fn extract_headings(doc: &Html) -> Vec<Heading> {
    doc.select(&HEADING_SELECTOR)
        .filter_map(|el| {
            let level = el.value().name()[1..].parse::<u8>().ok()?;
            let text = visible_text(el);
            if text.is_empty() {
                None
            } else {
                Some(Heading { level, text })
            }
        })
        .collect()
}

/// Raw href values of all anchors
pub fn extract_hrefs(doc: &Html) -> Vec<String> {
    doc.select(&ANCHOR_SELECTOR)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect()
}

/// Counts of images, scripts and stylesheets referenced by the page
pub fn count_resources(doc: &Html) -> ResourceCounts {
    let stylesheets = doc
        .select(&LINK_REL_SELECTOR)
        .filter(|el| has_rel(el, "stylesheet"))
        .count();

    ResourceCounts::new(
        doc.select(&IMAGE_SELECTOR).count(),
        doc.select(&SCRIPT_SELECTOR).count(),
        stylesheets,
    )
}

/// Visible text of every p, div and section element
pub fn extract_text_blocks(doc: &Html) -> Vec<String> {
    doc.select(&BLOCK_SELECTOR).map(visible_text).collect()
}

fn extract_link_rel(doc: &Html, rel: &str) -> Option<String> {
    doc.select(&LINK_REL_SELECTOR)
        .filter(|el| has_rel(el, rel))
        .filter_map(|el| el.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .map(|href| href.to_string())
}

fn first_attr(doc: &Html, selector: &Selector, attr: &str) -> Option<String> {
    doc.select(selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// rel is a space separated token list, compared case-insensitively
fn has_rel(el: &ElementRef<'_>, token: &str) -> bool {
    el.value()
        .attr("rel")
        .is_some_and(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case(token)))
}

/// Text content with script and style bodies left out, whitespace collapsed
fn visible_text(element: ElementRef<'_>) -> String {
    let mut buf = String::new();
    push_visible_text(element, &mut buf);
    collapse_whitespace(&buf)
}

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "code", "em", "i", "kbd", "mark", "q", "s", "small", "span", "strong",
    "sub", "sup", "time", "u",
];

fn push_visible_text(element: ElementRef<'_>, buf: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            buf.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if matches!(name, "script" | "style" | "template") {
                continue;
            }
            // Block children are separated so their words do not run together
            let block = !INLINE_ELEMENTS.contains(&name);
            if block {
                buf.push(' ');
            }
            push_visible_text(child_el, buf);
            if block {
                buf.push(' ');
            }
        }
    }
}
