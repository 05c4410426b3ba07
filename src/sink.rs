//! Append-only CSV sink for product records
//!
//! The sink owns durable output. It creates the file with a header row on
//! first use, appends one line per record afterwards, and never truncates
//! or rewrites prior content. Field values are sanitized with a lossy but
//! simple rule instead of a quoting scheme: commas become spaces and
//! double quotes become apostrophes.
//!
//! The sink performs no locking; callers serialize concurrent appends
//! against the same path (the batch pipeline writes sequentially after
//! its parallel stages complete).

use crate::record::Product;
use crate::SinkError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Fixed header line written when the output file is created
pub const CSV_HEADER: &str = "ITEM_NUMBER,NAME,CONDITION,PRICE,URL";

/// Appends one product record to the CSV file at `path`
///
/// Creates the file with the header row if it does not exist yet. The
/// header plus row (or the row alone) goes out in a single buffered
/// write, so a failed call leaves no partial line behind.
pub fn append(path: &Path, product: &Product) -> Result<(), SinkError> {
    let sink_err = |source: std::io::Error| SinkError {
        path: path.display().to_string(),
        source,
    };

    let is_new = !path.exists();

    let mut line = String::new();
    if is_new {
        line.push_str(CSV_HEADER);
        line.push('\n');
    }
    line.push_str(&csv_line(product));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(sink_err)?;
    file.write_all(line.as_bytes()).map_err(sink_err)?;

    Ok(())
}

/// Formats one newline-terminated CSV line for a record
fn csv_line(product: &Product) -> String {
    format!(
        "{},{},{},{},{}\n",
        sanitize(&product.item_number),
        sanitize(&product.name),
        sanitize(&product.condition),
        sanitize(&product.price),
        sanitize(&product.url),
    )
}

/// Makes a field value safe for bare CSV embedding
///
/// Lossy on purpose: `,` becomes a single space and `"` becomes an
/// apostrophe, so no quoting or escaping is ever needed downstream.
fn sanitize(value: &str) -> String {
    value.replace(',', " ").replace('"', "'")
}
