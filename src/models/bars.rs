//! Price bar model shared by providers, the level detector and the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC bar as delivered by the market data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }
}

/// Close of the most recent bar, the price fed to the signal generator.
pub fn latest_close(bars: &[PriceBar]) -> Option<f64> {
    bars.last().map(|b| b.close)
}
