use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// Which side of the host boundary a link falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Internal,
    External,
}

/// Deduplicated links split by host, each in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSets {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

/// Regex based exclusion of links from the report
#[derive(Debug, Default)]
pub struct LinkFilter {
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Compile the exclude patterns
    pub fn new(exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }
        Ok(Self { exclude_regexes })
    }

    /// True when the link matches any exclude pattern
    pub fn is_excluded(&self, url: &Url) -> bool {
        let url_str = url.as_str();
        self.exclude_regexes.iter().any(|r| r.is_match(url_str))
    }
}

/// The URL relative links are resolved against: `<base href>` if it resolves, else the page URL
pub fn base_url(page_url: &Url, base_href: Option<&str>) -> Url {
    base_href
        .and_then(|href| page_url.join(href.trim()).ok())
        .filter(is_web_url)
        .unwrap_or_else(|| page_url.clone())
}

/// Resolve an anchor href to an absolute http(s) URL without fragment.
///
/// Returns None for empty and fragment-only hrefs and for anything that does
/// not resolve to http or https (`javascript:`, `mailto:`, `tel:` ...).
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let resolved = base.join(href).ok()?;
    if !is_web_url(&resolved) {
        ::log::trace!("Ignoring non-web link: {}", href);
        return None;
    }

    Some(normalize_url(&resolved))
}

/// Remove the fragment from a URL
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}

/// Host equality, ASCII case-insensitive, ports ignored
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// Internal when the link is on the source URL's host
pub fn classify(source: &Url, link: &Url) -> LinkKind {
    if same_host(source, link) {
        LinkKind::Internal
    } else {
        LinkKind::External
    }
}

/// Resolve, filter, classify and deduplicate the raw hrefs of a page
pub fn classify_links<'a, I>(source: &Url, base: &Url, hrefs: I, filter: &LinkFilter) -> LinkSets
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut sets = LinkSets::default();

    for href in hrefs {
        let Some(resolved) = resolve_href(base, href) else {
            continue;
        };
        if filter.is_excluded(&resolved) {
            ::log::debug!("Link filter rejected: {}", resolved);
            continue;
        }

        let kind = classify(source, &resolved);
        let link = resolved.to_string();
        if !seen.insert(link.clone()) {
            continue;
        }
        match kind {
            LinkKind::Internal => sets.internal.push(link),
            LinkKind::External => sets.external.push(link),
        }
    }

    ::log::debug!(
        "Classified {} internal and {} external links",
        sets.internal.len(),
        sets.external.len()
    );
    sets
}

fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}
