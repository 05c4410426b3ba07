//! HTTP fetcher for listing pages
//!
//! This module handles all HTTP requests, including:
//! - Building the shared HTTP client
//! - GET requests for listing pages
//! - Normalizing transport failures into a single `FetchError`
//!
//! There is no retry logic anywhere in the fetcher: a failed request is a
//! failed work item, and retry policy (currently: none) belongs to the
//! coordinator.

use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;
use std::time::Duration;

/// A successfully fetched listing page, paired with its source URL
///
/// Transient: owned by the pipeline stage that produced it until the
/// extractor consumes it. Never persisted.
#[derive(Debug)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
}

/// Builds the HTTP client shared by all fetch calls
///
/// The client requests identity content-encoding: downstream extraction
/// relies on the raw page text exactly as served, so transparent
/// compression stays disabled.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(concat!("mercury/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Fetches a single listing page
///
/// Issues one GET request. Any non-success status, network error, or
/// timeout yields a `FetchError` carrying the URL and the underlying
/// cause.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The listing URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let reason = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            return Err(FetchError {
                url: url.to_string(),
                reason,
            });
        }
    };

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError {
            url: url.to_string(),
            reason: format!("HTTP {}", status.as_u16()),
        });
    }

    match response.text().await {
        Ok(body) => Ok(FetchedPage {
            url: url.to_string(),
            body,
        }),
        Err(e) => Err(FetchError {
            url: url.to_string(),
            reason: format!("failed to read body: {}", e),
        }),
    }
}
