//! HTTP fetcher: the transport collaborator boundary
//!
//! Fetch failures are classified for logging but are homogeneous to the
//! crawl loop: any non-success outcome means the page is skipped, never
//! retried at this layer.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Page body retrieved
    Success { status_code: u16, body: String },

    /// Server answered with a non-success status
    HttpError { status_code: u16 },

    /// Transport-level failure (timeout, connection refused, body read)
    NetworkError { error: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Builds the HTTP client used for a whole session
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body; encoding normalization is reqwest's concern
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            return FetchOutcome::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchOutcome::NetworkError {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&test_user_agent(), 10).is_ok());
    }

    #[test]
    fn test_outcome_success_flag() {
        let ok = FetchOutcome::Success {
            status_code: 200,
            body: String::new(),
        };
        let err = FetchOutcome::HttpError { status_code: 404 };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }

    // Network behavior is covered end-to-end with wiremock in
    // tests/crawl_tests.rs.
}
