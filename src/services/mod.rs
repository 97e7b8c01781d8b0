//! External collaborators: market data, TA analysis, results log.

pub mod market_data;
pub mod recommendation;
pub mod results_log;
pub mod tradingview;
pub mod yahoo;

pub use market_data::{MarketDataProvider, StaticMarketDataProvider};
pub use recommendation::RecommendationProvider;
pub use results_log::{RawDataPage, RawDataQuery, ResultsLog, SortOrder};
