//! TradingView scanner client

use crate::error::DataError;
use crate::models::analysis::TaAnalysis;
use crate::services::recommendation::RecommendationProvider;
use backon::{ExponentialBuilder, Retryable};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::compute::{compute_sections, indicator_columns};

const PROVIDER: &str = "TradingView";

#[derive(Debug, Serialize)]
struct ScanRequest {
    symbols: ScanSymbols,
    columns: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ScanSymbols {
    tickers: Vec<String>,
    query: ScanQuery,
}

#[derive(Debug, Serialize)]
struct ScanQuery {
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScanResponse {
    #[serde(default)]
    data: Vec<ScanRow>,
}

#[derive(Debug, Deserialize)]
struct ScanRow {
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "d")]
    values: Vec<Value>,
}

/// Column suffix the scanner uses for an interval; daily bars have none.
pub fn interval_suffix(interval: &str) -> Result<&'static str, DataError> {
    let suffix = match interval {
        "1m" => "|1",
        "5m" => "|5",
        "15m" => "|15",
        "30m" => "|30",
        "1h" => "|60",
        "2h" => "|120",
        "4h" => "|240",
        "1d" => "",
        "1W" => "|1W",
        "1M" => "|1M",
        other => {
            return Err(DataError::Parse {
                what: "interval",
                message: format!("unsupported analysis interval '{}'", other),
            })
        }
    };
    Ok(suffix)
}

pub struct TradingViewProvider {
    base_url: String,
    client: reqwest::Client,
    max_retries: usize,
}

impl TradingViewProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            max_retries: 2,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn scan(&self, url: &str, request: &ScanRequest) -> Result<ScanResponse, DataError> {
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }
        response.json::<ScanResponse>().await.map_err(|e| DataError::Parse {
            what: "scanner response",
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for TradingViewProvider {
    async fn get_analysis(
        &self,
        symbol: &str,
        exchange: &str,
        screener: &str,
        interval: &str,
    ) -> Result<TaAnalysis, DataError> {
        let suffix = interval_suffix(interval)?;
        let columns = indicator_columns();
        let ticker = format!("{}:{}", exchange, symbol).to_uppercase();
        let request = ScanRequest {
            symbols: ScanSymbols {
                tickers: vec![ticker.clone()],
                query: ScanQuery { types: Vec::new() },
            },
            columns: columns.iter().map(|c| format!("{}{}", c, suffix)).collect(),
        };
        let url = format!(
            "{}/{}/scan",
            self.base_url.trim_end_matches('/'),
            screener.to_lowercase()
        );
        debug!(ticker = %ticker, url = %url, "Requesting scanner analysis");

        let response = (|| self.scan(&url, &request))
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(200))
                    .with_max_times(self.max_retries),
            )
            .when(|e: &DataError| e.is_transient())
            .notify(|e: &DataError, wait: Duration| {
                warn!(ticker = %ticker, error = %e, wait_ms = wait.as_millis() as u64, "Scanner request failed, retrying");
            })
            .await?;

        let row = response
            .data
            .into_iter()
            .find(|row| row.symbol.eq_ignore_ascii_case(&ticker))
            .ok_or_else(|| DataError::EmptyResponse(ticker.clone()))?;

        let indicators: BTreeMap<String, f64> = columns
            .into_iter()
            .zip(row.values.iter())
            .filter_map(|(name, value)| value.as_f64().map(|v| (name, v)))
            .collect();

        let computed = compute_sections(&indicators);
        info!(
            ticker = %ticker,
            recommendation = %computed.summary.recommendation,
            buy = computed.summary.buy,
            sell = computed.summary.sell,
            neutral = computed.summary.neutral,
            "Scanner analysis for {}: {}",
            ticker,
            computed.summary.recommendation
        );

        Ok(TaAnalysis {
            symbol: symbol.to_string(),
            exchange: exchange.to_string(),
            screener: screener.to_string(),
            interval: interval.to_string(),
            summary: computed.summary,
            moving_averages: computed.moving_averages,
            oscillators: computed.oscillators,
            indicators,
        })
    }
}
