use crate::config::InspectorConfig;
use crate::fetch::FetchedPage;
use crate::links::{self, LinkFilter};
use crate::parsers::ParsedDocument;
use crate::results::{
    CompressionInfo, DuplicateBlock, DuplicationReport, PageReport, PerformanceReport,
    ResourceCounts,
};
use crate::utils::truncate_chars;
use std::collections::HashSet;
use url::Url;

/// Assemble the report for a fetched and parsed page.
///
/// Links are resolved against the page's base URL and classified against
/// `source`, the URL the user asked for.
pub fn build_report(
    source: &Url,
    page: &FetchedPage,
    parsed: ParsedDocument,
    filter: &LinkFilter,
    config: &InspectorConfig,
) -> PageReport {
    let base = links::base_url(&page.url, parsed.base_href.as_deref());
    let link_sets = links::classify_links(
        source,
        &base,
        parsed.hrefs.iter().map(String::as_str),
        filter,
    );

    let canonical_url = parsed
        .canonical_href
        .as_deref()
        .and_then(|href| base.join(href).ok())
        .map(|u| u.to_string());

    let duplication = find_duplicates(
        &parsed.text_blocks,
        config.min_duplicate_chars,
        config.snippet_chars,
    );

    PageReport {
        url: source.to_string(),
        final_url: page.url.to_string(),
        status: page.status,
        title: parsed.title,
        description: parsed.description,
        language: parsed.language,
        canonical_url,
        meta_tags: parsed.meta_tags,
        headings: parsed.headings,
        internal_links: link_sets.internal,
        external_links: link_sets.external,
        performance: performance(page, parsed.resources),
        duplication,
    }
}

/// Load metrics from the fetch plus the resource counts of the document
pub fn performance(page: &FetchedPage, resources: ResourceCounts) -> PerformanceReport {
    let gzip_enabled = page
        .content_encoding
        .as_deref()
        .is_some_and(|enc| enc.to_ascii_lowercase().contains("gzip"));

    PerformanceReport {
        load_time_ms: page.elapsed.as_millis() as u64,
        page_size: page.size,
        resources,
        compression: CompressionInfo {
            gzip_enabled,
            content_encoding: page.content_encoding.clone(),
            content_type: page.content_type.clone(),
            cache_control: page.cache_control.clone(),
        },
    }
}

/// Report text blocks that repeat an earlier block verbatim.
///
/// Blocks of `min_chars` characters or fewer are not fingerprinted.
pub fn find_duplicates(blocks: &[String], min_chars: usize, snippet_chars: usize) -> DuplicationReport {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates = Vec::new();

    for block in blocks {
        let length = block.chars().count();
        if length <= min_chars {
            continue;
        }
        if !seen.insert(block.as_str()) {
            duplicates.push(DuplicateBlock {
                original: truncate_chars(block, snippet_chars),
                duplicate: truncate_chars(block, snippet_chars),
                length,
            });
        }
    }

    if !duplicates.is_empty() {
        ::log::info!("Found {} duplicate content blocks", duplicates.len());
    }

    DuplicationReport {
        blocks_analyzed: blocks.len(),
        duplicates,
    }
}
