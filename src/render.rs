use crate::error::Result;
use crate::results::PageReport;
use crate::utils::format_size;
use std::fmt::{self, Write};

/// Number of duplicate sets shown in the text and HTML views
const MAX_DUPLICATES_SHOWN: usize = 3;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Console text
    Text,
    /// Standalone HTML page
    Html,
    /// Pretty-printed JSON
    Json,
}

/// Render a report in the requested format
pub fn render(report: &PageReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Html => render_html(report),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &PageReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Console report
pub fn render_text(report: &PageReport) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, report)?;
    Ok(out)
}

/// Standalone HTML page with every report section
pub fn render_html(report: &PageReport) -> Result<String> {
    let mut out = String::new();
    write_html(&mut out, report)?;
    Ok(out)
}

fn write_text(out: &mut impl Write, report: &PageReport) -> fmt::Result {
    let rule = "=".repeat(50);

    writeln!(out, "{}", rule)?;
    writeln!(out, "Page report for {}", report.url)?;
    writeln!(out, "{}", rule)?;
    if report.final_url != report.url {
        writeln!(out, "Redirected to: {}", report.final_url)?;
    }
    writeln!(out, "Status:        {}", report.status)?;
    writeln!(out, "Title:         {}", or_none(report.title.as_deref()))?;
    writeln!(out, "Description:   {}", or_none(report.description.as_deref()))?;
    writeln!(out, "Language:      {}", or_none(report.language.as_deref()))?;
    writeln!(out, "Canonical URL: {}", or_none(report.canonical_url.as_deref()))?;

    writeln!(out, "\nMeta Tags ({}):", report.meta_tags.len())?;
    write_tree(
        out,
        report
            .meta_tags
            .iter()
            .map(|m| format!("{}: {}", m.name, m.content)),
    )?;

    writeln!(out, "\nHeadings ({}):", report.headings.len())?;
    for heading in &report.headings {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        writeln!(out, "{}h{}: {}", indent, heading.level, heading.text)?;
    }

    writeln!(out, "\nInternal Links ({}):", report.internal_links.len())?;
    write_tree(out, report.internal_links.iter().cloned())?;

    writeln!(out, "\nExternal Links ({}):", report.external_links.len())?;
    write_tree(out, report.external_links.iter().cloned())?;

    let perf = &report.performance;
    writeln!(out, "\nPerformance Metrics:")?;
    writeln!(
        out,
        "├── Load Time: {:.3} seconds",
        perf.load_time_ms as f64 / 1000.0
    )?;
    writeln!(out, "└── Page Size: {}", format_size(perf.page_size))?;

    writeln!(out, "\nResource Counts:")?;
    writeln!(out, "├── Images: {}", perf.resources.images)?;
    writeln!(out, "├── Scripts: {}", perf.resources.scripts)?;
    writeln!(out, "├── Stylesheets: {}", perf.resources.stylesheets)?;
    writeln!(out, "└── Total Resources: {}", perf.resources.total)?;

    writeln!(out, "\nCompression Info:")?;
    writeln!(out, "├── Gzip Enabled: {}", perf.compression.gzip_enabled)?;
    writeln!(
        out,
        "├── Content Type: {}",
        or_none(perf.compression.content_type.as_deref())
    )?;
    writeln!(
        out,
        "└── Cache Control: {}",
        perf.compression.cache_control.as_deref().unwrap_or("Not set")
    )?;

    let dup = &report.duplication;
    writeln!(out, "\nContent Duplication:")?;
    writeln!(out, "├── Blocks Analyzed: {}", dup.blocks_analyzed)?;
    writeln!(out, "└── Duplicate Blocks Found: {}", dup.duplicate_count())?;
    for (i, block) in dup.duplicates.iter().take(MAX_DUPLICATES_SHOWN).enumerate() {
        writeln!(out, "\nDuplicate Set {}:", i + 1)?;
        writeln!(out, "├── Original: {}...", block.original)?;
        writeln!(out, "└── Duplicate: {}...", block.duplicate)?;
    }
    if dup.duplicate_count() > MAX_DUPLICATES_SHOWN {
        writeln!(
            out,
            "\n... and {} more duplicate sets",
            dup.duplicate_count() - MAX_DUPLICATES_SHOWN
        )?;
    }

    Ok(())
}

fn write_html(out: &mut impl Write, report: &PageReport) -> fmt::Result {
    let heading = report.title.as_deref().unwrap_or(report.url.as_str());

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Page report: {}</title>", escape_html(heading))?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>Page report</h1>")?;

    writeln!(out, "<dl>")?;
    write_definition(out, "URL", Some(&report.url))?;
    if report.final_url != report.url {
        write_definition(out, "Redirected to", Some(&report.final_url))?;
    }
    write_definition(out, "Status", Some(report.status.to_string()))?;
    write_definition(out, "Title", report.title.as_deref())?;
    write_definition(out, "Description", report.description.as_deref())?;
    write_definition(out, "Language", report.language.as_deref())?;
    write_definition(out, "Canonical URL", report.canonical_url.as_deref())?;
    writeln!(out, "</dl>")?;

    writeln!(out, "<h2>Meta Tags ({})</h2>", report.meta_tags.len())?;
    writeln!(out, "<ul>")?;
    for tag in &report.meta_tags {
        writeln!(
            out,
            "<li><code>{}</code>: {}</li>",
            escape_html(&tag.name),
            escape_html(&tag.content)
        )?;
    }
    writeln!(out, "</ul>")?;

    writeln!(out, "<h2>Headings ({})</h2>", report.headings.len())?;
    writeln!(out, "<ul>")?;
    for h in &report.headings {
        writeln!(
            out,
            "<li style=\"margin-left: {}em\">h{}: {}</li>",
            h.level.saturating_sub(1),
            h.level,
            escape_html(&h.text)
        )?;
    }
    writeln!(out, "</ul>")?;

    write_link_list(out, "Internal Links", &report.internal_links)?;
    write_link_list(out, "External Links", &report.external_links)?;

    let perf = &report.performance;
    writeln!(out, "<h2>Performance</h2>")?;
    writeln!(out, "<dl>")?;
    write_definition(
        out,
        "Load Time",
        Some(format!("{:.3} seconds", perf.load_time_ms as f64 / 1000.0)),
    )?;
    write_definition(out, "Page Size", Some(format_size(perf.page_size)))?;
    write_definition(out, "Images", Some(perf.resources.images.to_string()))?;
    write_definition(out, "Scripts", Some(perf.resources.scripts.to_string()))?;
    write_definition(out, "Stylesheets", Some(perf.resources.stylesheets.to_string()))?;
    write_definition(
        out,
        "Gzip Enabled",
        Some(perf.compression.gzip_enabled.to_string()),
    )?;
    write_definition(out, "Content Type", perf.compression.content_type.as_deref())?;
    write_definition(
        out,
        "Cache Control",
        Some(perf.compression.cache_control.as_deref().unwrap_or("Not set")),
    )?;
    writeln!(out, "</dl>")?;

    let dup = &report.duplication;
    writeln!(out, "<h2>Content Duplication</h2>")?;
    writeln!(
        out,
        "<p>{} duplicate blocks in {} analyzed.</p>",
        dup.duplicate_count(),
        dup.blocks_analyzed
    )?;
    if !dup.duplicates.is_empty() {
        writeln!(out, "<ol>")?;
        for block in dup.duplicates.iter().take(MAX_DUPLICATES_SHOWN) {
            writeln!(out, "<li>{}...</li>", escape_html(&block.duplicate))?;
        }
        writeln!(out, "</ol>")?;
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

/// Escape text for use in HTML element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("(none)")
}

fn write_tree(out: &mut impl Write, items: impl ExactSizeIterator<Item = String>) -> fmt::Result {
    let len = items.len();
    if len == 0 {
        return writeln!(out, "└── (none)");
    }
    for (i, item) in items.enumerate() {
        let branch = if i + 1 == len { "└──" } else { "├──" };
        writeln!(out, "{} {}", branch, item)?;
    }
    Ok(())
}

fn write_definition(out: &mut impl Write, term: &str, value: Option<impl AsRef<str>>) -> fmt::Result {
    let value: Option<&str> = value.as_ref().map(|v| v.as_ref());
    writeln!(
        out,
        "<dt>{}</dt><dd>{}</dd>",
        escape_html(term),
        escape_html(or_none(value))
    )
}

fn write_link_list(out: &mut impl Write, title: &str, links: &[String]) -> fmt::Result {
    writeln!(out, "<h2>{} ({})</h2>", title, links.len())?;
    writeln!(out, "<ul>")?;
    for link in links {
        let escaped = escape_html(link);
        writeln!(out, "<li><a href=\"{}\">{}</a></li>", escaped, escaped)?;
    }
    writeln!(out, "</ul>")
}
