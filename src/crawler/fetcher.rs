//! HTTP fetcher implementation
//!
//! This module handles the transport side of the crawler:
//! - Building one HTTP client carrying the browser identity headers
//! - GET requests for the playlist page
//! - Mapping status codes and network failures onto crawl errors

use crate::config::HttpConfig;
use crate::{ConfigError, RippleError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, Response};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// Every request made through the client carries the configured User-Agent
/// and Accept-Language headers and is bounded by the configured timeout.
///
/// # Example
///
/// ```no_run
/// use playlist_ripple::config::HttpConfig;
/// use playlist_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, RippleError> {
    let language = HeaderValue::from_str(&config.accept_language).map_err(|e| {
        ConfigError::Validation(format!(
            "accept_language is not a valid header value: {}",
            e
        ))
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, language);

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a page and returns its body text
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Non-success status | `Transport` |
/// | Timeout | `Transport` |
/// | Connection refused | `Transport` |
/// | Redirect loop | `Transport` |
/// | Body could not be read or decoded | `Transport` |
pub async fn fetch_document(client: &Client, url: &str) -> Result<String, RippleError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    let response = ensure_success(url, response)?;

    response
        .text()
        .await
        .map_err(|e| classify_transport_error(url, e))
}

/// Rejects responses whose status is not 2xx
pub(crate) fn ensure_success(url: &str, response: Response) -> Result<Response, RippleError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(RippleError::Transport {
        url: url.to_string(),
        message: format!("HTTP {}", status),
    })
}

/// Classifies a failure to send a request or read its response body
///
/// Every failure is a transport error; only the message differs.
pub(crate) fn classify_transport_error(url: &str, error: reqwest::Error) -> RippleError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else if error.is_redirect() {
        format!("Redirect failed: {}", error)
    } else {
        error.to_string()
    };

    RippleError::Transport {
        url: url.to_string(),
        message,
    }
}
