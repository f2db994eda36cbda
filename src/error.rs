use thiserror::Error;

/// Failure to obtain the page from the network
#[derive(Error, Debug)]
pub enum FetchError {
    /// The input could not be turned into an http(s) URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// DNS, connect or transport failure
    #[error("Unreachable: {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout
    #[error("Timed out fetching {url}")]
    Timeout { url: String },

    /// The server answered with a non-2xx status
    #[error("HTTP error {status} from {url}")]
    Status { url: String, status: u16 },

    /// The body exceeded the configured maximum size
    #[error("Response too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}

impl FetchError {
    /// True when no HTTP response was received at all
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            FetchError::Unreachable { .. } | FetchError::Timeout { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: cannot parse content of type '{content_type}' as HTML")]
    Parse { content_type: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),
}

impl InspectError {
    /// True for errors caused by configuration rather than by the page
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            InspectError::Config(_) | InspectError::Pattern(_) | InspectError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;
