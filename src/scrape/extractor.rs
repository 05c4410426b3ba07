//! HTML field extraction for listing pages
//!
//! This module turns a fetched page into a `Product`. Each field has its
//! own site-specific location rule, and every rule is independently
//! fallible: a miss on any field fails the whole page with the stage that
//! missed, never a partial record.
//!
//! The rules are deliberately tied to eBay's item-page markup:
//! - the title is the page's single top-level heading, which the site
//!   emits with one stray leading whitespace character;
//! - the condition lives in a dedicated container, and the clean text is
//!   on a nested screen-reader span (the visible page repeats the
//!   condition elsewhere, so a flat lookup would pick up duplicates);
//! - the price markup has drifted between site revisions, so lookup is a
//!   fallback chain tried in order.

use crate::record::Product;
use crate::{ExtractError, ExtractStage};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Container element holding the item condition block
const CONDITION_BLOCK: &str = "div.x-item-condition-text";

/// Screen-reader-only span inside the condition block with the clean text
const CONDITION_LABEL: &str = "span.clipped";

/// Price lookup strategies, tried in order; first match wins
///
/// eBay has marked the display price by item-type microdata in some page
/// revisions and by a fixed element id in others.
const PRICE_STRATEGIES: &[&str] = &["[itemprop=\"price\"]", "#prcIsum"];

/// Extracts a complete product record from a fetched listing page
///
/// Pure function of its inputs; no side effects. Fails with the first
/// stage that cannot produce its field.
///
/// # Arguments
///
/// * `url` - The listing URL the page was fetched from
/// * `page` - The raw HTML body
pub fn extract_product(url: &str, page: &str) -> Result<Product, ExtractError> {
    let fail = |stage: ExtractStage| ExtractError {
        url: url.to_string(),
        stage,
    };

    if page.trim().is_empty() {
        return Err(fail(ExtractStage::Parse));
    }
    let document = Html::parse_document(page);

    let item_number = item_number_from_url(url).ok_or_else(|| fail(ExtractStage::ItemNumber))?;
    let name = extract_name(&document).ok_or_else(|| fail(ExtractStage::Name))?;
    let condition = extract_condition(&document).ok_or_else(|| fail(ExtractStage::Condition))?;
    let price = extract_price(&document).ok_or_else(|| fail(ExtractStage::Price))?;

    Ok(Product {
        url: url.to_string(),
        item_number,
        name,
        condition,
        price,
    })
}

/// Derives the item number from the listing URL
///
/// The item number is the path segment that follows `itm`, e.g.
/// `123456789012` in `https://www.ebay.com/itm/123456789012`. This is a
/// named parse of the URL path rather than a character-offset slice, but
/// it yields the same value for the site's stable URL shape.
fn item_number_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut segments = parsed.path_segments()?;
    segments.find(|s| *s == "itm")?;
    let item_number = segments.next()?;
    if item_number.is_empty() || !item_number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(item_number.to_string())
}

/// Extracts the listing title from the top-level heading
///
/// The site's markup ships the heading with exactly one stray leading
/// whitespace character; strip that one character and nothing else.
fn extract_name(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    let heading = document.select(&selector).next()?;
    let text = heading.text().collect::<String>();
    if text.is_empty() {
        return None;
    }

    let name = match text.chars().next() {
        Some(first) if first.is_whitespace() => text[first.len_utf8()..].to_string(),
        _ => text,
    };
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Extracts the item condition via the two-level container lookup
///
/// The visible page can carry duplicate condition text outside the
/// condition block, so the lookup first narrows to the container and only
/// then reads the nested screen-reader label.
fn extract_condition(document: &Html) -> Option<String> {
    let block_selector = Selector::parse(CONDITION_BLOCK).ok()?;
    let label_selector = Selector::parse(CONDITION_LABEL).ok()?;

    let block = document.select(&block_selector).next()?;
    let label = block.select(&label_selector).next()?;
    non_empty_text(label)
}

/// Extracts the display price, falling back across markup revisions
fn extract_price(document: &Html) -> Option<String> {
    for strategy in PRICE_STRATEGIES {
        let selector = Selector::parse(strategy).ok()?;
        if let Some(element) = document.select(&selector).next() {
            if let Some(text) = non_empty_text(element) {
                return Some(text);
            }
        }
    }
    None
}

fn non_empty_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
