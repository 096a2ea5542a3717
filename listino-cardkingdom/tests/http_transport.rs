use httpmock::prelude::*;
use listino_cardkingdom::{CardKingdomProvider, HttpFeed};
use listino_core::{Catalog, FeedSource, Finish, ListinoError, NaiveDate, PriceProvider, RetryConfig};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;

fn fast_retry(retries: u32) -> RetryConfig {
    RetryConfig {
        retries,
        min_backoff_ms: 1,
        max_backoff_ms: 5,
        factor: 2,
        jitter_percent: 0,
    }
}

#[tokio::test]
async fn downloads_and_parses_the_price_list() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/pricelist")
                .header("accept", "application/json");
            then.status(200).json_body(json!({
                "data": [
                    {"id": 1001, "is_foil": "false", "price_retail": "3.49", "price_buy": "1.80"}
                ]
            }));
        })
        .await;

    let ck = CardKingdomProvider::builder()
        .api_url(server.url("/api/pricelist"))
        .retry(fast_retry(0))
        .build()
        .unwrap();
    let catalog = Catalog::from_records(vec![
        json!({"uuid": "U1", "identifiers": {"cardKingdomId": "1001"}}),
    ]);
    let prices = ck
        .today_prices(&catalog, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
        .await
        .unwrap();

    m.assert_hits_async(1).await;
    assert!(prices["U1"][&Finish::NonFoil].retail().is_some());
}

#[tokio::test]
async fn server_errors_are_retried_until_exhausted() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/pricelist");
            then.status(503);
        })
        .await;

    let feed = HttpFeed::new(reqwest::Client::new()).with_retry(fast_retry(2));
    let err = feed.fetch(&server.url("/api/pricelist")).await.unwrap_err();

    m.assert_hits_async(3).await;
    assert!(matches!(err, ListinoError::Http { status: 503, .. }));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/pricelist");
            then.status(404);
        })
        .await;

    let feed = HttpFeed::new(reqwest::Client::new()).with_retry(fast_retry(3));
    let err = feed.fetch(&server.url("/api/pricelist")).await.unwrap_err();

    m.assert_hits_async(1).await;
    assert!(matches!(err, ListinoError::Http { status: 404, .. }));
}

#[tokio::test]
async fn undecodable_body_is_a_data_error() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/pricelist");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let feed = HttpFeed::new(reqwest::Client::new()).with_retry(fast_retry(3));
    let err = feed.fetch(&server.url("/api/pricelist")).await.unwrap_err();

    m.assert_hits_async(1).await;
    assert!(matches!(err, ListinoError::Data(_)));
}

#[tokio::test]
async fn injected_headers_are_sent() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/pricelist")
                .header("x-api-key", "k-123");
            then.status(200).json_body(json!({"data": []}));
        })
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_static("k-123"));
    let feed = HttpFeed::new(reqwest::Client::new()).with_headers(headers);
    let doc = feed.fetch(&server.url("/api/pricelist")).await.unwrap();

    m.assert_hits_async(1).await;
    assert_eq!(doc, json!({"data": []}));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let feed = HttpFeed::new(reqwest::Client::new()).with_retry(fast_retry(1));
    let err = feed
        .fetch("http://127.0.0.1:9/api/pricelist")
        .await
        .unwrap_err();
    assert!(matches!(err, ListinoError::Transport { .. }));
}
