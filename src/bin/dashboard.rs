//! Levelboard Dashboard Server
//!
//! Refreshes the support/resistance view on a cron schedule and serves it,
//! together with analysis and trade statistics, over HTTP.

use dotenvy::dotenv;
use levelboard::config::DashboardConfig;
use levelboard::core::dashboard::Dashboard;
use levelboard::core::http::{start_server, AppState};
use levelboard::core::scheduler::DashboardScheduler;
use levelboard::logging;
use levelboard::metrics::Metrics;
use levelboard::services::tradingview::TradingViewProvider;
use levelboard::services::yahoo::YahooMarketDataProvider;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = DashboardConfig::from_env()?;
    let env = levelboard::config::get_environment();
    info!("Starting Levelboard Dashboard");
    info!(environment = %env, "Environment");
    info!(
        symbol = %config.symbol,
        exchange = %config.exchange,
        interval = %config.bar_interval,
        range = %config.bar_range,
        timezone = %config.display_timezone,
        "Tracking {}:{} ({} bars over {})",
        config.exchange,
        config.symbol,
        config.bar_interval,
        config.bar_range
    );

    let metrics = Arc::new(Metrics::new()?);
    let market_data = Arc::new(YahooMarketDataProvider::new(config.yahoo_base_url.clone())?);
    let recommendations = Arc::new(TradingViewProvider::new(config.tradingview_base_url.clone())?);

    let port = config.port;
    let interval = config.refresh_interval_seconds;
    let dashboard = Arc::new(
        Dashboard::new(config, market_data, recommendations).with_metrics(metrics.clone()),
    );
    let scheduler = Arc::new(DashboardScheduler::new(dashboard, interval)?);

    // Warm the cache so the first page load does not wait on the providers
    if let Err(e) = scheduler.refresh_now().await {
        warn!(error = %e, "Initial refresh failed");
    }
    scheduler.start().await;

    let state = AppState::new(metrics, scheduler.clone());
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("Dashboard started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down dashboard...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    scheduler.stop().await;
    info!("Dashboard stopped");

    Ok(())
}
