//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::core::dashboard::{DashboardSnapshot, MorePage};
use crate::core::scheduler::DashboardScheduler;
use crate::error::DataError;
use crate::metrics::Metrics;
use crate::services::results_log::{RawDataPage, RawDataQuery};

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub scheduler: Arc<DashboardScheduler>,
}

impl AppState {
    pub fn new(metrics: Arc<Metrics>, scheduler: Arc<DashboardScheduler>) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            scheduler,
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn error_response(e: DataError) -> (StatusCode, Json<Value>) {
    let status = match &e {
        DataError::ResultsLogMissing(_) => StatusCode::NOT_FOUND,
        DataError::MissingColumn(_) | DataError::InvalidPage(_) => StatusCode::BAD_REQUEST,
        DataError::Http(_)
        | DataError::Status { .. }
        | DataError::Api { .. }
        | DataError::EmptyResponse(_) => StatusCode::BAD_GATEWAY,
        DataError::Parse { .. } | DataError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(error = %e, "Request failed");
    } else {
        warn!(error = %e, "Request rejected");
    }
    (status, Json(json!({ "error": e.to_string() })))
}

/// Reports "degraded" while the latest dashboard refresh has failed.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let last_error = state.scheduler.last_error().await;
    let status = if last_error.is_some() { "degraded" } else { "healthy" };
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": status,
        "last_error": last_error,
        "uptime_seconds": uptime_seconds,
        "scheduler_running": state.scheduler.is_running().await,
        "service": "levelboard-dashboard"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Main page: cached snapshot, or a fresh one before the first tick or when
/// periodic refresh is disabled.
async fn dashboard_handler(State(state): State<AppState>) -> ApiResult<DashboardSnapshot> {
    if state.scheduler.is_enabled() {
        if let Some(snapshot) = state.scheduler.latest().await {
            return Ok(Json(snapshot));
        }
    }
    state
        .scheduler
        .refresh_now()
        .await
        .map(Json)
        .map_err(error_response)
}

async fn more_handler(State(state): State<AppState>) -> ApiResult<MorePage> {
    state
        .scheduler
        .dashboard()
        .more()
        .await
        .map(Json)
        .map_err(error_response)
}

async fn raw_data_handler(
    State(state): State<AppState>,
    Query(query): Query<RawDataQuery>,
) -> ApiResult<RawDataPage> {
    state
        .scheduler
        .dashboard()
        .raw_data(&query)
        .map(Json)
        .map_err(error_response)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/more", get(more_handler))
        .route("/api/raw-data", get(raw_data_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
