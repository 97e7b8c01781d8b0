//! Unit tests for the dashboard scheduler

use crate::common_fixtures::bars_at;
use levelboard::config::DashboardConfig;
use levelboard::core::dashboard::Dashboard;
use levelboard::core::scheduler::{cron_expression, DashboardScheduler};
use levelboard::services::market_data::StaticMarketDataProvider;
use levelboard::services::recommendation::RecommendationProvider;
use levelboard::error::DataError;
use levelboard::models::analysis::TaAnalysis;
use std::sync::Arc;

struct NoAnalysis;

#[async_trait::async_trait]
impl RecommendationProvider for NoAnalysis {
    async fn get_analysis(
        &self,
        symbol: &str,
        _exchange: &str,
        _screener: &str,
        _interval: &str,
    ) -> Result<TaAnalysis, DataError> {
        Err(DataError::EmptyResponse(symbol.to_string()))
    }
}

fn dashboard(results_csv: std::path::PathBuf) -> Arc<Dashboard> {
    Arc::new(Dashboard::new(
        DashboardConfig {
            results_csv,
            ..DashboardConfig::default()
        },
        Arc::new(StaticMarketDataProvider::new(bars_at(&[3.0, 2.0, 1.0, 2.0, 3.0]))),
        Arc::new(NoAnalysis),
    ))
}

#[test]
fn test_cron_expression() {
    assert_eq!(cron_expression(15).as_deref(), Some("*/15 * * * * *"));
    assert_eq!(cron_expression(60).as_deref(), Some("0 */1 * * * *"));
    assert_eq!(cron_expression(300).as_deref(), Some("0 */5 * * * *"));
    assert_eq!(cron_expression(7200).as_deref(), Some("0 0 */2 * * *"));
}

#[test]
fn test_uneven_intervals_have_no_cron_expression() {
    for interval in [0, 45, 90, 420, 5400, 18000] {
        assert_eq!(cron_expression(interval), None, "interval {}", interval);
    }
}

#[test]
fn test_uneven_interval_is_rejected() {
    assert!(DashboardScheduler::new(dashboard("unused.csv".into()), 90).is_err());
}

#[tokio::test]
async fn test_zero_interval_disables_schedule() {
    let scheduler = DashboardScheduler::new(dashboard("unused.csv".into()), 0).unwrap();
    scheduler.start().await;
    assert!(!scheduler.is_running().await);
}

#[tokio::test]
async fn test_start_and_stop() {
    let scheduler = DashboardScheduler::new(dashboard("unused.csv".into()), 60).unwrap();
    assert!(!scheduler.is_running().await);
    scheduler.start().await;
    assert!(scheduler.is_running().await);
    scheduler.stop().await;
    assert!(!scheduler.is_running().await);
}

#[tokio::test]
async fn test_refresh_now_caches_snapshot() {
    let path = std::env::temp_dir().join(format!("levelboard-scheduler-{}.csv", std::process::id()));
    std::fs::write(&path, "Current Price,Next Price,Prediction Correct\n1.0,2.0,True\n").unwrap();

    let scheduler = DashboardScheduler::new(dashboard(path), 60).unwrap();
    assert!(scheduler.latest().await.is_none());

    let snapshot = scheduler.refresh_now().await.unwrap();
    assert_eq!(snapshot.statistics.wins, 1);

    let cached = scheduler.latest().await.expect("cached snapshot");
    assert_eq!(cached.refreshed_at, snapshot.refreshed_at);
    assert_eq!(cached.market.unwrap().levels.len(), 1);
}

#[tokio::test]
async fn test_failed_refresh_leaves_cache_empty() {
    let scheduler =
        DashboardScheduler::new(dashboard("/nonexistent/levelboard/results.csv".into()), 60).unwrap();
    assert!(scheduler.refresh_now().await.is_err());
    assert!(scheduler.latest().await.is_none());
    let message = scheduler.last_error().await.expect("recorded error");
    assert!(message.contains("/nonexistent/levelboard/results.csv"));
}

#[tokio::test]
async fn test_successful_refresh_clears_last_error() {
    let path = std::env::temp_dir().join(format!("levelboard-recover-{}.csv", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let scheduler = DashboardScheduler::new(dashboard(path.clone()), 60).unwrap();
    assert!(scheduler.refresh_now().await.is_err());
    assert!(scheduler.last_error().await.is_some());

    std::fs::write(&path, "Current Price,Next Price,Prediction Correct\n1.0,2.0,True\n").unwrap();
    scheduler.refresh_now().await.unwrap();
    assert_eq!(scheduler.last_error().await, None);
}
