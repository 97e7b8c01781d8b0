//! Dashboard orchestration
//!
//! Pulls bars, analysis and the results log through injected providers and
//! runs the level detector and signal generator over them. Every call works
//! from freshly fetched data; nothing is carried between refreshes.

use crate::config::DashboardConfig;
use crate::core::chart;
use crate::error::DataError;
use crate::indicators::structure::{group_levels, identify_levels};
use crate::metrics::Metrics;
use crate::models::analysis::{Recommendation, TaAnalysis};
use crate::models::bars::{latest_close, PriceBar};
use crate::models::chart::{CandleView, LevelOverlay};
use crate::models::levels::{GroupedLevel, RawLevel};
use crate::models::signal::SignalDecision;
use crate::models::trades::TradeMetrics;
use crate::services::market_data::MarketDataProvider;
use crate::services::recommendation::RecommendationProvider;
use crate::services::results_log::{query_table, RawDataPage, RawDataQuery, ResultsLog};
use crate::signals::SignalGenerator;
use crate::stats::calculate_metrics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const NO_DATA_MESSAGE: &str = "No data available for the selected period.";

/// Price chart, levels and signal for the latest bars.
#[derive(Debug, Clone, Serialize)]
pub struct MarketView {
    pub current_price: f64,
    pub candles: Vec<CandleView>,
    pub raw_levels: Vec<RawLevel>,
    pub levels: Vec<GroupedLevel>,
    pub overlays: Vec<LevelOverlay>,
    pub signal: SignalDecision,
}

/// Headline recommendation with its vote tally.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub recommendation: Recommendation,
    pub label: String,
    pub buy: u32,
    pub sell: u32,
    pub neutral: u32,
}

impl From<&TaAnalysis> for RecommendationView {
    fn from(analysis: &TaAnalysis) -> Self {
        Self {
            recommendation: analysis.summary.recommendation,
            label: analysis.summary.recommendation.display_label(),
            buy: analysis.summary.buy,
            sell: analysis.summary.sell,
            neutral: analysis.summary.neutral,
        }
    }
}

/// Main page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<RecommendationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_error: Option<String>,
    pub statistics: TradeMetrics,
    pub refreshed_at: DateTime<Utc>,
}

/// "More" page: full analysis breakdown plus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MorePage {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<TaAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
    pub statistics: TradeMetrics,
}

pub struct Dashboard {
    config: DashboardConfig,
    market_data: Arc<dyn MarketDataProvider + Send + Sync>,
    recommendations: Arc<dyn RecommendationProvider + Send + Sync>,
    results: ResultsLog,
    generator: SignalGenerator,
    metrics: Option<Arc<Metrics>>,
}

impl Dashboard {
    pub fn new(
        config: DashboardConfig,
        market_data: Arc<dyn MarketDataProvider + Send + Sync>,
        recommendations: Arc<dyn RecommendationProvider + Send + Sync>,
    ) -> Self {
        let results = ResultsLog::new(config.results_csv.clone());
        Self {
            config,
            market_data,
            recommendations,
            results,
            generator: SignalGenerator::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Detect levels in `bars` and classify the latest close against them.
    ///
    /// Returns `None` for an empty series.
    pub fn analyze_bars(&self, bars: &[PriceBar]) -> Option<MarketView> {
        let current_price = latest_close(bars)?;
        let raw_levels = identify_levels(bars);
        let levels = group_levels(&raw_levels, self.config.level_threshold);
        let signal = self.generator.generate_signal(current_price, &levels);
        let tz = self.config.display_timezone;

        Some(MarketView {
            current_price,
            candles: chart::candles(bars, tz),
            overlays: chart::plot_levels(bars, &levels, tz),
            raw_levels,
            levels,
            signal,
        })
    }

    /// Build the main page.
    ///
    /// A missing or unreadable results log fails the whole refresh; market
    /// data and analysis failures are reported inside the snapshot.
    pub async fn refresh(&self) -> Result<DashboardSnapshot, DataError> {
        let result = self.build_snapshot().await;
        if let Some(ref metrics) = self.metrics {
            match &result {
                Ok(snapshot) => {
                    metrics.dashboard_refresh_total.inc();
                    let levels = snapshot.market.as_ref().map(|m| m.levels.len()).unwrap_or(0);
                    metrics.dashboard_levels_detected.set(levels as f64);
                }
                Err(_) => metrics.dashboard_refresh_failures_total.inc(),
            }
        }
        result
    }

    async fn build_snapshot(&self) -> Result<DashboardSnapshot, DataError> {
        let statistics = self.statistics()?;
        let cfg = &self.config;

        let (bars, analysis) = tokio::join!(
            self.market_data
                .get_bars(&cfg.symbol, &cfg.bar_interval, &cfg.bar_range),
            self.analysis()
        );

        let (market, market_error) = match bars {
            Ok(bars) => match self.analyze_bars(&bars) {
                Some(view) => {
                    info!(
                        symbol = %cfg.symbol,
                        bars = bars.len(),
                        raw_levels = view.raw_levels.len(),
                        grouped_levels = view.levels.len(),
                        signal = %view.signal.signal,
                        price = view.current_price,
                        "Refreshed {}: {} at {:.2}",
                        cfg.symbol,
                        view.signal.signal,
                        view.current_price
                    );
                    (Some(view), None)
                }
                None => {
                    debug!(symbol = %cfg.symbol, "No bars returned");
                    (None, Some(NO_DATA_MESSAGE.to_string()))
                }
            },
            Err(e) => {
                warn!(symbol = %cfg.symbol, error = %e, "Failed to fetch bars");
                (None, Some(e.to_string()))
            }
        };

        let (recommendation, recommendation_error) = match analysis {
            Ok(analysis) => (Some(RecommendationView::from(&analysis)), None),
            Err(e) => (None, Some(format!("Error: {}", e))),
        };

        Ok(DashboardSnapshot {
            symbol: cfg.symbol.clone(),
            market,
            market_error,
            recommendation,
            recommendation_error,
            statistics,
            refreshed_at: Utc::now(),
        })
    }

    /// Build the "more" page.
    pub async fn more(&self) -> Result<MorePage, DataError> {
        let statistics = self.statistics()?;
        let (analysis, analysis_error) = match self.analysis().await {
            Ok(analysis) => (Some(analysis), None),
            Err(e) => (None, Some(format!("Error: {}", e))),
        };

        Ok(MorePage {
            symbol: self.config.symbol.clone(),
            analysis,
            analysis_error,
            statistics,
        })
    }

    /// Serve one page of the results log.
    pub fn raw_data(&self, query: &RawDataQuery) -> Result<RawDataPage, DataError> {
        let table = self.results.load_table()?;
        query_table(&table, query)
    }

    pub fn statistics(&self) -> Result<TradeMetrics, DataError> {
        let records = self.results.load_records()?;
        Ok(calculate_metrics(&records))
    }

    async fn analysis(&self) -> Result<TaAnalysis, DataError> {
        let cfg = &self.config;
        let result = self
            .recommendations
            .get_analysis(&cfg.symbol, &cfg.exchange, &cfg.screener, &cfg.bar_interval)
            .await;
        if let Err(ref e) = result {
            warn!(symbol = %cfg.symbol, error = %e, "Failed to fetch analysis");
        }
        result
    }
}
