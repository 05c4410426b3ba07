//! Build-time configuration for Mercury
//!
//! Mercury is deliberately configuration-light: the few knobs it has are
//! compile-time constants that an operator edits before building, not
//! runtime settings.

/// Upper bound on concurrent workers in batch mode
///
/// Set to the core count of the deployment machine. The effective pool
/// size for a batch is `min(WORKER_CEILING, batch size)`, never below 1.
pub const WORKER_CEILING: usize = 8;

/// Required prefix for listing URLs
///
/// Every work item must point at an eBay item page. The item number is
/// the path segment that follows this prefix, so URLs of any other shape
/// are rejected before a request is made.
pub const LISTING_URL_PREFIX: &str = "https://www.ebay.com/itm/";

/// Required extension for the output file passed via `--output`
pub const OUTPUT_EXTENSION: &str = ".csv";

/// Checks whether a work item looks like an eBay listing URL
///
/// This is the coordinator-side pre-check: it runs before any network
/// work, so blank lines and stray non-listing URLs in an input file fail
/// fast without a request.
pub fn is_listing_url(url: &str) -> bool {
    let rest = match url.strip_prefix(LISTING_URL_PREFIX) {
        Some(rest) => rest,
        None => return false,
    };
    !rest.is_empty()
}
