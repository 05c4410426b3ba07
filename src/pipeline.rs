//! Pipeline coordinator: batch and single-URL orchestration
//!
//! The coordinator owns concurrency and result ordering. A batch run has
//! two bounded fan-out/fan-in phases (fetch all, then extract all the
//! survivors), each collecting results into pre-sized slot vectors keyed
//! by input index, so emitted records always follow input order no matter
//! how the workers interleave.
//!
//! Failure policy, deliberate and asymmetric:
//! - batch mode tolerates per-item failures: a URL that fails fetch or
//!   extract is reported and dropped, the rest of the batch proceeds;
//! - single mode aborts the whole run on the first failure;
//! - a sink write failure is always fatal, since a silently partial CSV
//!   is worse than an explicit stop.

use crate::config::{is_listing_url, WORKER_CEILING};
use crate::record::Product;
use crate::scrape::{build_http_client, extract_product, fetch_page, FetchedPage};
use crate::{console, sink, FetchError, MercuryError};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Counts reported after a batch run completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Effective worker-pool size for a batch
///
/// `min(WORKER_CEILING, batch size)` with a floor of 1, so small batches
/// never spin up idle workers and an empty input still gets a valid pool
/// size.
pub fn worker_count(batch_len: usize) -> usize {
    WORKER_CEILING.min(batch_len).max(1)
}

/// Processes a single URL synchronously on the calling task
///
/// No pool is spun up. Any failure, including the listing-URL pre-check,
/// aborts the run.
pub async fn run_single(url: &str, output: Option<&Path>) -> crate::Result<()> {
    if !is_listing_url(url) {
        return Err(MercuryError::Input(format!(
            "not an eBay listing URL: {:?}",
            url
        )));
    }

    let client = build_http_client()?;
    let page = fetch_page(&client, url).await?;
    let product = extract_product(&page.url, &page.body)?;

    if let Some(path) = output {
        sink::append(path, &product)?;
    }
    console::print_product(&product);

    Ok(())
}

/// Processes a batch of URLs across the bounded worker pool
///
/// Results are collected positionally, so console output and CSV rows
/// follow the input ordering. Per-item failures are printed and dropped;
/// only a sink write failure aborts the run.
pub async fn run_batch(urls: Vec<String>, output: Option<&Path>) -> crate::Result<BatchReport> {
    let started = Instant::now();
    let workers = worker_count(urls.len());
    tracing::info!("Processing {} URLs with {} workers", urls.len(), workers);

    let client = build_http_client()?;
    let pool = Arc::new(Semaphore::new(workers));

    let fetched = fetch_stage(&client, &pool, &urls).await;
    let extracted = extract_stage(&pool, fetched).await;
    let report = emit_results(&extracted, output)?;

    tracing::info!(
        "Batch complete: {} succeeded, {} failed in {:?}",
        report.succeeded,
        report.failed,
        started.elapsed()
    );
    Ok(report)
}

/// Drives the sink and console for collected batch results, in order
///
/// Runs sequentially after both parallel stages, so appends against the
/// output path never contend. Per-item failures only count; a sink
/// failure propagates and ends the run.
fn emit_results(
    results: &[Result<Product, MercuryError>],
    output: Option<&Path>,
) -> crate::Result<BatchReport> {
    let mut report = BatchReport {
        succeeded: 0,
        failed: 0,
    };
    for result in results {
        match result {
            Ok(product) => {
                if let Some(path) = output {
                    sink::append(path, product)?;
                }
                console::print_product(product);
                report.succeeded += 1;
            }
            Err(cause) => {
                console::print_failure(cause);
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

/// Stage 1: fetch every URL in parallel, collecting by input index
///
/// The listing-URL pre-check runs here, before a request is issued, so
/// blank lines and non-listing URLs from an input file surface as ordinary
/// per-item fetch failures.
async fn fetch_stage(
    client: &reqwest::Client,
    pool: &Arc<Semaphore>,
    urls: &[String],
) -> Vec<Result<FetchedPage, FetchError>> {
    let mut handles = Vec::with_capacity(urls.len());
    for url in urls {
        let client = client.clone();
        let pool = Arc::clone(pool);
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            // Semaphore errors only on close, which never happens here
            let _permit = pool.acquire().await;
            if !is_listing_url(&url) {
                return Err(FetchError {
                    reason: "not an eBay listing URL".to_string(),
                    url,
                });
            }
            tracing::debug!("Fetching {}", url);
            fetch_page(&client, &url).await
        }));
    }

    let mut slots = Vec::with_capacity(urls.len());
    for (handle, url) in handles.into_iter().zip(urls) {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(FetchError {
                url: url.clone(),
                reason: format!("worker task failed: {}", e),
            }),
        };
        slots.push(result);
    }
    slots
}

/// Stage 2: extract every surviving fetch result in parallel
///
/// Failures from stage 1 pass through untouched, keeping the slot for
/// that input index so ordering survives both phases.
async fn extract_stage(
    pool: &Arc<Semaphore>,
    fetched: Vec<Result<FetchedPage, FetchError>>,
) -> Vec<Result<Product, MercuryError>> {
    let mut handles = Vec::with_capacity(fetched.len());
    for result in fetched {
        let pool = Arc::clone(pool);
        handles.push(tokio::spawn(async move {
            let page = result.map_err(MercuryError::from)?;
            let _permit = pool.acquire().await;
            tracing::debug!("Extracting {}", page.url);
            extract_product(&page.url, &page.body).map_err(MercuryError::from)
        }));
    }

    let mut slots = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(MercuryError::Worker(format!("extract task failed: {}", e))),
        };
        slots.push(result);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn product(n: u64) -> Product {
        Product {
            url: format!("https://www.ebay.com/itm/{:012}", n),
            item_number: format!("{:012}", n),
            name: format!("Item {}", n),
            condition: "New".to_string(),
            price: "US $1.00".to_string(),
        }
    }

    #[test]
    fn test_emit_tolerates_one_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.csv");

        // Three inputs, the middle one failed at fetch
        let results = vec![
            Ok(product(1)),
            Err(MercuryError::Fetch(FetchError {
                url: "https://www.ebay.com/itm/000000000002".to_string(),
                reason: "HTTP 404".to_string(),
            })),
            Ok(product(3)),
        ];

        let report = emit_results(&results, Some(&path)).unwrap();
        assert_eq!(
            report,
            BatchReport {
                succeeded: 2,
                failed: 1
            }
        );

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ITEM_NUMBER"));
        // Survivors keep input order
        assert!(lines[1].starts_with("000000000001"));
        assert!(lines[2].starts_with("000000000003"));
    }

    #[test]
    fn test_emit_without_output_path_writes_nothing() {
        let results = vec![Ok(product(1))];
        let report = emit_results(&results, None).unwrap();
        assert_eq!(report.succeeded, 1);
    }

    #[test]
    fn test_emit_sink_failure_is_fatal() {
        let dir = tempdir().unwrap();
        // The directory itself is not a writable file
        let err = emit_results(&[Ok(product(1))], Some(dir.path())).unwrap_err();
        assert!(matches!(err, MercuryError::Sink(_)));
    }

    #[test]
    fn test_worker_count_small_batch() {
        // 3 URLs on an 8-core ceiling: one worker per URL
        assert_eq!(worker_count(3), 3);
    }

    #[test]
    fn test_worker_count_large_batch() {
        assert_eq!(worker_count(20), 8);
    }

    #[test]
    fn test_worker_count_floor() {
        assert_eq!(worker_count(0), 1);
        assert_eq!(worker_count(1), 1);
    }

    #[tokio::test]
    async fn test_single_rejects_non_listing_url() {
        let err = run_single("https://example.com/", None).await.unwrap_err();
        assert!(matches!(err, MercuryError::Input(_)));
    }

    #[tokio::test]
    async fn test_batch_precheck_fails_without_network() {
        // Blank line and a non-listing URL: both fail fast, no requests
        let urls = vec![String::new(), "https://example.com/x".to_string()];
        let report = run_batch(urls, None).await.unwrap();
        assert_eq!(
            report,
            BatchReport {
                succeeded: 0,
                failed: 2
            }
        );
    }
}
