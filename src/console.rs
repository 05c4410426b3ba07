//! Styled console output for scrape results
//!
//! Human-facing result output goes to stdout/stderr through the functions
//! here; tracing carries progress and diagnostics separately. The ANSI
//! escape codes live in this module as plain constants, so nothing
//! touches process-wide terminal state.

use crate::record::Product;

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Prints the multi-line success block for one scraped listing
pub fn print_product(product: &Product) {
    println!("{}{}#{}{}", BOLD, GREEN, product.item_number, RESET);
    println!("  Name:      {}", product.name);
    println!("  Condition: {}", product.condition);
    println!("  Price:     {}", product.price);
    println!("  URL:       {}", product.url);
    println!();
}

/// Prints the single failure line for one work item
///
/// `cause` is the display form of the fetch or extract error; it already
/// names the URL, so the line stays compact.
pub fn print_failure(cause: &dyn std::fmt::Display) {
    eprintln!("{}{}✗ {}{}", BOLD, RED, cause, RESET);
}
