use crate::error::{InspectError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for a page inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// User-Agent header sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum accepted body size in bytes
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: u64,

    /// Regex patterns for links to leave out of the report
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Text blocks shorter than this are not checked for duplication
    #[serde(default = "default_min_duplicate_chars")]
    pub min_duplicate_chars: usize,

    /// Length of the text snippets reported for duplicates
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
            exclude_patterns: Vec::new(),
            min_duplicate_chars: default_min_duplicate_chars(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

impl InspectorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| InspectError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| InspectError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the fetcher cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(InspectError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_response_bytes == 0 {
            return Err(InspectError::Config(
                "max_response_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// 10 MiB
fn default_max_response_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_min_duplicate_chars() -> usize {
    50
}

fn default_snippet_chars() -> usize {
    100
}
