use serde::{Deserialize, Serialize};

/// The result of inspecting one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    /// URL as requested
    pub url: String,

    /// URL of the final response, after redirects
    pub final_url: String,

    /// HTTP status of the final response
    pub status: u16,

    /// Title of the page (if available)
    pub title: Option<String>,

    /// Content of the description meta tag (if available)
    pub description: Option<String>,

    /// Value of `<html lang>`
    pub language: Option<String>,

    /// Canonical URL, resolved against the page's base URL
    pub canonical_url: Option<String>,

    pub meta_tags: Vec<MetaTag>,

    /// Headings in document order
    pub headings: Vec<Heading>,

    /// Deduplicated links to the same host as the requested URL
    pub internal_links: Vec<String>,

    /// Deduplicated links to any other host
    pub external_links: Vec<String>,

    pub performance: PerformanceReport,

    pub duplication: DuplicationReport,
}

/// A `<meta>` tag keyed by its name, property or http-equiv attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 for h1 through 6 for h6
    pub level: u8,
    pub text: String,
}

/// Load metrics of the single fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub load_time_ms: u64,

    /// Body size in bytes
    pub page_size: usize,

    pub resources: ResourceCounts,

    pub compression: CompressionInfo,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCounts {
    pub images: usize,
    pub scripts: usize,
    pub stylesheets: usize,
    pub total: usize,
}

impl ResourceCounts {
    pub fn new(images: usize, scripts: usize, stylesheets: usize) -> Self {
        Self {
            images,
            scripts,
            stylesheets,
            total: images + scripts + stylesheets,
        }
    }
}

/// Transport headers relevant to page weight
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionInfo {
    pub gzip_enabled: bool,
    pub content_encoding: Option<String>,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
}

/// Repeated text blocks within the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicationReport {
    /// Number of p, div and section elements examined
    pub blocks_analyzed: usize,
    pub duplicates: Vec<DuplicateBlock>,
}

impl DuplicationReport {
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateBlock {
    /// Snippet of the first occurrence
    pub original: String,
    /// Snippet of the repeated occurrence
    pub duplicate: String,
    /// Character count of the full block
    pub length: usize,
}
