//! Integration tests for the TradingView scanner client against a mock server

use levelboard::error::DataError;
use levelboard::models::analysis::{Recommendation, Vote};
use levelboard::services::recommendation::RecommendationProvider;
use levelboard::services::tradingview::TradingViewProvider;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api_server::test_utils::scanner_body;

fn provider(server: &MockServer) -> TradingViewProvider {
    TradingViewProvider::with_client(server.uri(), reqwest::Client::new())
}

#[tokio::test]
async fn requests_interval_suffixed_columns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/america/scan"))
        .and(body_string_contains("NASDAQ:AAPL"))
        .and(body_string_contains("Recommend.All|1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scanner_body()))
        .mount(&server)
        .await;

    let analysis = provider(&server)
        .get_analysis("aapl", "nasdaq", "America", "1m")
        .await
        .unwrap();
    assert_eq!(analysis.summary.recommendation, Recommendation::StrongBuy);
    assert_eq!(analysis.oscillators.recommendation, Recommendation::Neutral);
    assert_eq!(analysis.moving_averages.buy, 15);
    assert_eq!(analysis.oscillators.compute.get("W%R"), Some(&Vote::Buy));
    assert_eq!(analysis.indicators.get("close"), Some(&100.0));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["symbols"]["tickers"][0], "NASDAQ:AAPL");
}

#[tokio::test]
async fn null_values_cast_no_vote() {
    let server = MockServer::start().await;
    let mut body = scanner_body();
    for value in body["data"][0]["d"].as_array_mut().unwrap().iter_mut() {
        *value = Value::Null;
    }
    Mock::given(method("POST"))
        .and(path("/america/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let analysis = provider(&server)
        .get_analysis("AAPL", "NASDAQ", "america", "1m")
        .await
        .unwrap();
    assert_eq!(analysis.summary.recommendation, Recommendation::Error);
    assert!(analysis.indicators.is_empty());
}

#[tokio::test]
async fn missing_symbol_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/america/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalCount": 0, "data": [] })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .get_analysis("AAPL", "NASDAQ", "america", "1m")
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::EmptyResponse(ref t) if t == "NASDAQ:AAPL"));
}

#[tokio::test]
async fn unsupported_interval_skips_request() {
    let server = MockServer::start().await;
    let err = provider(&server)
        .get_analysis("AAPL", "NASDAQ", "america", "7m")
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Parse { what: "interval", .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
