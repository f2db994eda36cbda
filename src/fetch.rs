use crate::config::InspectorConfig;
use crate::error::{FetchError, InspectError};
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderName};
use std::time::{Duration, Instant};
use url::Url;

/// A successfully fetched page and the transport details needed for the report
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL of the final response, after redirects
    pub url: Url,
    pub status: u16,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
    pub cache_control: Option<String>,
    /// Body decoded as lossy UTF-8
    pub body: String,
    /// Body size in bytes as received
    pub size: usize,
    /// Time from sending the request to having the full body
    pub elapsed: Duration,
}

/// Turn user input into an absolute http(s) URL.
///
/// Input without a scheme is assumed to be https.
pub fn parse_target(input: &str) -> Result<Url, FetchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl {
            url: input.to_string(),
            reason: "empty URL".to_string(),
        });
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| FetchError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(FetchError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::InvalidUrl {
            url: trimmed.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}

/// True when the input starts with `<scheme>://`. A `://` later in the
/// input, e.g. inside a query string, does not count.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Thin wrapper around a reqwest client issuing the single GET of an inspection
pub struct HttpFetcher {
    client: Client,
    max_response_bytes: u64,
}

impl HttpFetcher {
    pub fn new(config: &InspectorConfig) -> Result<Self, InspectError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| InspectError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_response_bytes: config.max_response_bytes,
        })
    }

    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        ::log::info!("Fetching {}", url);
        let start = Instant::now();

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        ::log::debug!("{} answered {} after {:?}", url, status, start.elapsed());
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_response_bytes {
                return Err(FetchError::TooLarge {
                    size: content_length,
                    limit: self.max_response_bytes,
                });
            }
        }

        let final_url = response.url().clone();
        let headers = response.headers().clone();

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| request_error(url, e))?
        {
            let size = (body.len() + chunk.len()) as u64;
            if size > self.max_response_bytes {
                return Err(FetchError::TooLarge {
                    size,
                    limit: self.max_response_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }
        let elapsed = start.elapsed();

        ::log::info!(
            "Fetched {} bytes from {} in {:.3} seconds",
            body.len(),
            final_url,
            elapsed.as_secs_f64()
        );

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            content_type: header_value(&headers, CONTENT_TYPE),
            content_encoding: header_value(&headers, CONTENT_ENCODING),
            cache_control: header_value(&headers, CACHE_CONTROL),
            size: body.len(),
            body: String::from_utf8_lossy(&body).into_owned(),
            elapsed,
        })
    }
}

fn request_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Unreachable {
            url: url.to_string(),
            source: error,
        }
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_adds_https() {
        let url = parse_target("example.com/about").unwrap();
        assert_eq!(url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_parse_target_adds_https_with_url_in_query() {
        let url = parse_target("example.com/go?to=https://other.org/").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/go");
        assert_eq!(url.query(), Some("to=https://other.org/"));
    }

    #[test]
    fn test_parse_target_adds_https_with_port() {
        let url = parse_target("localhost:8080/status").unwrap();
        assert_eq!(url.as_str(), "https://localhost:8080/status");
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://example.com"));
        assert!(has_scheme("HTTPS://example.com"));
        assert!(has_scheme("ftp://example.com"));
        assert!(!has_scheme("example.com/go?to=https://other.org/"));
        assert!(!has_scheme("example.com"));
        assert!(!has_scheme("://example.com"));
    }

    #[test]
    fn test_parse_target_keeps_http() {
        let url = parse_target("  http://example.com  ").unwrap();
        assert_eq!(url.as_str(), "http://example.com/");
    }

    #[test]
    fn test_parse_target_rejects_other_schemes() {
        let err = parse_target("ftp://example.com/file").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn test_parse_target_rejects_empty() {
        assert!(matches!(
            parse_target("   "),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_fetch_error_helpers() {
        let err = FetchError::Status {
            url: "https://example.com/".to_string(),
            status: 404,
        };
        assert!(!err.is_unreachable());

        let err = FetchError::Timeout {
            url: "https://example.com/".to_string(),
        };
        assert!(err.is_unreachable());
    }
}
