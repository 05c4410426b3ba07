//! Integration tests for the fetch and extract stages
//!
//! These tests use wiremock to stand in for the listing site and run the
//! per-URL pipeline stages against real HTTP.

use mercury::scrape::{build_http_client, extract_product, fetch_page};
use mercury::ExtractStage;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A listing page with the markup shapes the extractor relies on
fn listing_html(name: &str, condition: &str, price: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{name} | For Sale</title></head>
<body>
  <h1> {name}</h1>
  <div class="vim x-item-condition-text">
    <span class="ux-textspans">{condition}</span>
    <span class="clipped">{condition}</span>
  </div>
  <div class="x-price-section">
    <span itemprop="price">{price}</span>
  </div>
</body>
</html>"#
    )
}

#[tokio::test]
async fn test_fetch_then_extract_round_trips_fields() {
    let server = MockServer::start().await;
    let url = format!("{}/itm/123456789012", server.uri());

    Mock::given(method("GET"))
        .and(path("/itm/123456789012"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html("Vintage Camera", "Pre-owned", "US $49.99")),
        )
        .mount(&server)
        .await;

    let client = build_http_client().unwrap();
    let page = fetch_page(&client, &url).await.unwrap();
    let product = extract_product(&page.url, &page.body).unwrap();

    assert_eq!(product.item_number, "123456789012");
    assert_eq!(product.name, "Vintage Camera");
    assert_eq!(product.condition, "Pre-owned");
    assert_eq!(product.price, "US $49.99");
    assert_eq!(product.url, url);
}

#[tokio::test]
async fn test_fetch_requests_identity_encoding() {
    let server = MockServer::start().await;
    let url = format!("{}/itm/123456789012", server.uri());

    // Only answer requests that disabled transparent compression
    Mock::given(method("GET"))
        .and(path("/itm/123456789012"))
        .and(header("accept-encoding", "identity"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_html("X", "New", "US $1.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_http_client().unwrap();
    let page = fetch_page(&client, &url).await.unwrap();
    assert!(page.body.contains("<h1>"));
}

#[tokio::test]
async fn test_fetch_non_success_status_fails() {
    let server = MockServer::start().await;
    let url = format!("{}/itm/000000000000", server.uri());

    Mock::given(method("GET"))
        .and(path("/itm/000000000000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = build_http_client().unwrap();
    let err = fetch_page(&client, &url).await.unwrap_err();
    assert_eq!(err.url, url);
    assert_eq!(err.reason, "HTTP 404");
}

#[tokio::test]
async fn test_extract_failure_from_served_page_names_stage() {
    let server = MockServer::start().await;
    let url = format!("{}/itm/123456789012", server.uri());

    // Page without a condition block
    let body = r#"<html><body><h1> Thing</h1><span itemprop="price">US $2.00</span></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/itm/123456789012"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = build_http_client().unwrap();
    let page = fetch_page(&client, &url).await.unwrap();
    let err = extract_product(&page.url, &page.body).unwrap_err();
    assert_eq!(err.stage, ExtractStage::Condition);
}
