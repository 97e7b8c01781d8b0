//! Yahoo Finance chart API client

use crate::error::DataError;
use crate::models::bars::PriceBar;
use crate::services::market_data::MarketDataProvider;
use backon::{ExponentialBuilder, Retryable};
use chrono::DateTime;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::messages::{ChartResponse, ChartResult};

const PROVIDER: &str = "Yahoo Finance";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; levelboard/0.1)";

pub struct YahooMarketDataProvider {
    base_url: String,
    client: reqwest::Client,
    max_retries: usize,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            max_retries: 3,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn chart_url(&self, symbol: &str, interval: &str, range: &str) -> Result<Url, DataError> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)
            .and_then(|u| u.join(&format!("v8/finance/chart/{}", symbol)))
            .map_err(|e| DataError::Parse {
                what: "chart URL",
                message: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("interval", interval)
            .append_pair("range", range);
        Ok(url)
    }

    async fn fetch_chart(&self, url: &Url) -> Result<ChartResponse, DataError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            // Yahoo reports unknown symbols as 404 with an error body.
            if status.as_u16() == 404 {
                if let Ok(body) = response.json::<ChartResponse>().await {
                    return Ok(body);
                }
            }
            return Err(DataError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        response.json::<ChartResponse>().await.map_err(|e| DataError::Parse {
            what: "chart response",
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_bars(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<PriceBar>, DataError> {
        let url = self.chart_url(symbol, interval, range)?;
        debug!(symbol = %symbol, url = %url, "Fetching chart data");

        let response = (|| self.fetch_chart(&url))
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(200))
                    .with_max_times(self.max_retries),
            )
            .when(|e: &DataError| e.is_transient())
            .notify(|e: &DataError, wait: Duration| {
                warn!(symbol = %symbol, error = %e, wait_ms = wait.as_millis() as u64, "Chart fetch failed, retrying");
            })
            .await?;

        if let Some(error) = response.chart.error {
            return Err(DataError::Api {
                provider: PROVIDER,
                message: format!("{} - {}", error.code, error.description),
            });
        }

        let result = response
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| DataError::EmptyResponse(symbol.to_string()))?;

        let bars = bars_from_chart(result);
        info!(symbol = %symbol, count = bars.len(), "Fetched {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }
}

/// Convert columnar chart data into bars, dropping rows with a missing price.
pub fn bars_from_chart(result: ChartResult) -> Vec<PriceBar> {
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let column = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let mut bars: Vec<PriceBar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            let open = column(&quote.open, i)?;
            let high = column(&quote.high, i)?;
            let low = column(&quote.low, i)?;
            let close = column(&quote.close, i)?;
            let volume = column(&quote.volume, i).unwrap_or(0.0);
            Some(PriceBar::new(timestamp, open, high, low, close).with_volume(volume))
        })
        .collect();

    bars.sort_by_key(|b| b.timestamp);
    bars
}
