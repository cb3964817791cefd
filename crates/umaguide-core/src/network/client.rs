//! HTTP client for the dataset endpoint.
//!
//! A thin wrapper around reqwest with:
//! - A configurable per-request timeout
//! - A fixed user agent
//! - Non-2xx responses mapped to [`GuideError::Network`] with the status kept

use super::retry::is_retryable_status;
use crate::config::NetworkConfig;
use crate::error::{GuideError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client used by [`super::HttpDatasetSource`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(NetworkConfig::REQUEST_TIMEOUT)
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| GuideError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and return the body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                GuideError::Timeout(self.timeout)
            } else {
                GuideError::Network {
                    message: format!("GET {} failed: {}", url, e),
                    status: None,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            if is_retryable_status(code) {
                warn!("GET {} answered {} (retryable)", extract_domain(url), status);
            }
            return Err(GuideError::Network {
                message: format!(
                    "HTTP {}: {}",
                    code,
                    status.canonical_reason().unwrap_or("Unknown")
                ),
                status: Some(code),
            });
        }

        let body = response.text().await.map_err(|e| GuideError::Network {
            message: format!("Failed to read body of {}: {}", url, e),
            status: Some(status.as_u16()),
        })?;
        debug!("GET {} -> {} bytes", url, body.len());
        Ok(body)
    }
}

/// Extract the host from a URL for log lines.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://umaguide.example.com/assets/data/characters.json"),
            "umaguide.example.com"
        );
        assert_eq!(extract_domain("not a url"), "unknown");
    }

    #[tokio::test]
    async fn test_client_with_timeout() {
        let client = HttpClient::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }
}
