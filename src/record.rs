//! The product record produced for each successfully scraped listing

/// Structured fields extracted from one eBay listing page
///
/// Constructed once by the extractor and immutable afterwards. A
/// `Product` is always complete: extraction either fills every field or
/// fails for the whole page, so none of these are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// The listing URL the record was scraped from
    pub url: String,

    /// The 12-digit eBay item number, taken from the URL path
    pub item_number: String,

    /// The listing title
    pub name: String,

    /// The item condition (e.g. "New", "Pre-owned")
    pub condition: String,

    /// The display price, as shown on the page (currency symbol included)
    pub price: String,
}
