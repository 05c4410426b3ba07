//! Scraping module: page fetching and field extraction
//!
//! This module contains the two per-URL pipeline stages:
//! - HTTP fetching of listing pages (identity encoding, no retries)
//! - HTML parsing and product field extraction

mod extractor;
mod fetcher;

pub use extractor::extract_product;
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
