// Re-export modules
pub mod analysis;
pub mod config;
pub mod error;
pub mod fetch;
pub mod links;
pub mod parsers;
pub mod render;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::InspectorConfig;
pub use error::{FetchError, InspectError};
pub use render::OutputFormat;
pub use results::PageReport;

use fetch::HttpFetcher;
use links::LinkFilter;
use parsers::ContentKind;

/// Builder for inspecting a single page
pub struct Inspector {
    url: String,
    config: InspectorConfig,
}

impl Inspector {
    /// Create a new Inspector for the given URL with default configuration
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            config: InspectorConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, InspectError> {
        let config = InspectorConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self, InspectError> {
        let config = InspectorConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_secs = timeout_seconds;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Leave links matching this regex out of the report
    pub fn with_exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.exclude_patterns.push(pattern.into());
        self
    }

    /// Fetch the page, parse it and build the report
    pub async fn inspect(self) -> Result<PageReport, InspectError> {
        self.config.validate()?;
        let source = fetch::parse_target(&self.url)?;
        let filter = LinkFilter::new(&self.config.exclude_patterns)?;
        let fetcher = HttpFetcher::new(&self.config)?;

        let page = fetcher.fetch(&source).await?;

        match ContentKind::from_content_type(page.content_type.as_deref()) {
            ContentKind::Html => {}
            ContentKind::Text => ::log::debug!(
                "Parsing {} content from {} as HTML",
                page.content_type.as_deref().unwrap_or("untyped"),
                page.url
            ),
            ContentKind::Unparseable => {
                return Err(InspectError::Parse {
                    content_type: page.content_type.clone().unwrap_or_default(),
                });
            }
        }

        let parsed = parsers::html::parse(&page.body);
        let report = analysis::build_report(&source, &page, parsed, &filter, &self.config);

        ::log::info!(
            "Inspected {}: {} headings, {} internal and {} external links",
            report.url,
            report.headings.len(),
            report.internal_links.len(),
            report.external_links.len()
        );

        Ok(report)
    }
}

/// Inspect a page with default configuration
pub async fn inspect(url: &str) -> Result<PageReport, InspectError> {
    Inspector::new(url).inspect().await
}
