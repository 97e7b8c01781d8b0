//! Market data provider interface.

use crate::error::DataError;
use crate::models::bars::PriceBar;

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Fetch time-ordered bars for `symbol` at `interval` covering `range`
    /// (e.g. `1m` bars over `1d`).
    async fn get_bars(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<PriceBar>, DataError>;
}

/// Provider serving a fixed set of bars, for offline runs and tests.
pub struct StaticMarketDataProvider {
    bars: Vec<PriceBar>,
}

impl StaticMarketDataProvider {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_bars(
        &self,
        _symbol: &str,
        _interval: &str,
        _range: &str,
    ) -> Result<Vec<PriceBar>, DataError> {
        Ok(self.bars.clone())
    }
}
