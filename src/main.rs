//! Mercury main entry point
//!
//! This is the command-line interface for the Mercury listing scraper.

use anyhow::{bail, Context};
use clap::Parser;
use mercury::config::OUTPUT_EXTENSION;
use mercury::pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mercury: an eBay listing scraper
///
/// Mercury fetches eBay product listing pages, extracts the item number,
/// name, condition and price, prints each record to the console and
/// optionally appends it to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "mercury")]
#[command(version)]
#[command(about = "Scrape eBay product listings to CSV", long_about = None)]
#[command(group = clap::ArgGroup::new("input").required(true))]
struct Cli {
    /// A single listing URL to scrape
    #[arg(short, long, group = "input")]
    url: Option<String>,

    /// Path to a text file with one listing URL per line
    #[arg(short, long, group = "input")]
    file: Option<PathBuf>,

    /// CSV file to append records to (must end in .csv)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Some(output) = &cli.output {
        let name = output.to_string_lossy();
        if !name.ends_with(OUTPUT_EXTENSION) {
            bail!("output path must end in {}: {}", OUTPUT_EXTENSION, name);
        }
    }
    let output = cli.output.as_deref();

    if let Some(url) = &cli.url {
        pipeline::run_single(url.trim(), output).await?;
    } else if let Some(file) = &cli.file {
        let urls = read_url_file(file)?;
        pipeline::run_batch(urls, output).await?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mercury=info,warn"),
            1 => EnvFilter::new("mercury=debug,info"),
            2 => EnvFilter::new("mercury=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads work items from an input file, one URL per line
///
/// Lines are trimmed of surrounding whitespace and dispatched in file
/// order. Blank lines stay in the batch; the pipeline's pre-check reports
/// them as invalid listing URLs.
fn read_url_file(path: &PathBuf) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read URL file: {}", path.display()))?;
    Ok(content.lines().map(|line| line.trim().to_string()).collect())
}
