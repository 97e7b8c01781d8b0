//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and dashboard pages.


use serde_json::Value;

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["scheduler_running"], false);
    assert_eq!(body["service"], "levelboard-dashboard");
    assert!(body["last_error"].is_null());
}

#[tokio::test]
async fn health_endpoint_reports_failed_refresh() {
    let app = TestApiServer::with_results(None).await;
    let response = app.server.get("/api/dashboard").await;
    assert_eq!(response.status_code(), 404);

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "degraded");
    assert!(body["last_error"]
        .as_str()
        .unwrap()
        .starts_with("The CSV file"));
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/dashboard").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for metric in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "dashboard_refresh_total",
        "dashboard_levels_detected",
    ] {
        assert!(body.contains(metric), "Expected {} metric", metric);
    }
}

#[tokio::test]
async fn metrics_endpoint_tracks_request_count() {
    let app = TestApiServer::new().await;

    for _ in 0..3 {
        let _ = app.server.get("/health").await;
    }

    assert!(app.metrics.http_requests_total.get() >= 3);
}

#[tokio::test]
async fn dashboard_endpoint_returns_levels_and_signal() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/dashboard").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "AAPL");

    let market = &body["market"];
    assert_eq!(market["current_price"], 13.0);
    assert_eq!(market["signal"]["signal"], "Buy");
    assert_eq!(market["signal"]["highest_resistance"], 12.0);
    assert_eq!(market["signal"]["lowest_support"], 7.0);

    let levels = market["levels"].as_array().expect("levels array");
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0]["kind"], "Support");
    assert_eq!(levels[1]["kind"], "Resistance");

    let overlays = market["overlays"].as_array().expect("overlays array");
    assert_eq!(overlays[0]["color"], "Blue");
    assert_eq!(overlays[1]["color"], "Red");
    assert_eq!(overlays[0]["start"], "2024-03-15 19:33");

    assert_eq!(body["recommendation"]["label"], "STRONG BUY");
    assert_eq!(body["statistics"]["wins"], 2);
    assert_eq!(body["statistics"]["losses"], 1);
}

#[tokio::test]
async fn dashboard_endpoint_serves_cached_snapshot() {
    let app = TestApiServer::new().await;
    let first: Value = app.server.get("/api/dashboard").await.json();
    let second: Value = app.server.get("/api/dashboard").await.json();
    assert_eq!(first["refreshed_at"], second["refreshed_at"]);

    let requests = app.upstream.received_requests().await.expect("wiremock requests");
    let chart_requests = requests
        .iter()
        .filter(|r| r.url.path().starts_with("/v8/finance/chart"))
        .count();
    assert_eq!(chart_requests, 1);
}

#[tokio::test]
async fn dashboard_endpoint_reports_missing_results_log() {
    let app = TestApiServer::with_results(None).await;
    let response = app.server.get("/api/dashboard").await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    let message = body["error"].as_str().expect("error message");
    assert!(message.starts_with("The CSV file"));
    assert!(message.ends_with("Please ensure the file exists."));
}

#[tokio::test]
async fn more_endpoint_returns_full_analysis() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/more").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let analysis = &body["analysis"];
    assert_eq!(analysis["summary"]["recommendation"], "STRONG_BUY");
    assert_eq!(analysis["moving_averages"]["recommendation"], "STRONG_BUY");
    assert_eq!(analysis["oscillators"]["recommendation"], "NEUTRAL");
    assert_eq!(analysis["moving_averages"]["buy"], 15);
    assert_eq!(analysis["oscillators"]["compute"]["UO"], "BUY");
    assert_eq!(body["statistics"]["wins"], 2);
}

#[tokio::test]
async fn raw_data_endpoint_paginates() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/raw-data")
        .add_query_param("page_size", 2)
        .add_query_param("page", 2)
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["total_rows"], 3);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["rows"].as_array().unwrap().len(), 1);
    assert_eq!(body["columns"][0], "Date");
}

#[tokio::test]
async fn raw_data_endpoint_filters_and_sorts() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/raw-data")
        .add_query_param("filter_column", "Signal")
        .add_query_param("filter_value", "Buy")
        .add_query_param("sort_column", "Next Price")
        .add_query_param("order", "descending")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][3], "101.0");
    assert_eq!(rows[1][3], "99.0");
}

#[tokio::test]
async fn raw_data_endpoint_rejects_bad_requests() {
    let app = TestApiServer::new().await;

    let response = app.server.get("/api/raw-data").add_query_param("page", 0).await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .server
        .get("/api/raw-data")
        .add_query_param("sort_column", "Volume")
        .await;
    assert_eq!(response.status_code(), 400);
}
