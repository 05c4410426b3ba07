//! Mercury: a concurrent eBay listing scraper
//!
//! This crate fetches eBay product listing pages, extracts a small set of
//! structured fields (item number, name, condition, price), appends the
//! results to a CSV file and prints them to the console. Batches of URLs
//! are processed across a bounded worker pool with input-order results.

pub mod config;
pub mod console;
pub mod pipeline;
pub mod record;
pub mod scrape;
pub mod sink;

use thiserror::Error;

/// Main error type for Mercury operations
#[derive(Debug, Error)]
pub enum MercuryError {
    #[error("Input error: {0}")]
    Input(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to retrieve a listing page over HTTP
///
/// Carries the URL and a description of the underlying cause (non-success
/// status, network failure, timeout). The fetcher performs no retries.
#[derive(Debug, Error)]
#[error("Failed to fetch {url}: {reason}")]
pub struct FetchError {
    pub url: String,
    pub reason: String,
}

/// The extraction stage that failed for a listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStage {
    Parse,
    Name,
    ItemNumber,
    Condition,
    Price,
}

impl std::fmt::Display for ExtractStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExtractStage::Parse => "parse",
            ExtractStage::Name => "name",
            ExtractStage::ItemNumber => "item number",
            ExtractStage::Condition => "condition",
            ExtractStage::Price => "price",
        };
        f.write_str(name)
    }
}

/// Failure to extract a complete product record from a fetched page
///
/// Extraction is all-or-nothing: a failure at any stage fails the whole
/// page, and no partial record is produced.
#[derive(Debug, Error)]
#[error("Failed to extract {stage} from {url}")]
pub struct ExtractError {
    pub url: String,
    pub stage: ExtractStage,
}

/// Failure to append a record to the output CSV
#[derive(Debug, Error)]
#[error("Failed to write to {path}: {source}")]
pub struct SinkError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// Result type alias for Mercury operations
pub type Result<T> = std::result::Result<T, MercuryError>;
