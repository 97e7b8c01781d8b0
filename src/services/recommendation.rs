//! Technical analysis recommendation provider interface.

use crate::error::DataError;
use crate::models::analysis::TaAnalysis;

#[async_trait::async_trait]
pub trait RecommendationProvider {
    /// Fetch the analysis for `exchange:symbol` on `screener` at `interval`.
    async fn get_analysis(
        &self,
        symbol: &str,
        exchange: &str,
        screener: &str,
        interval: &str,
    ) -> Result<TaAnalysis, DataError>;
}
