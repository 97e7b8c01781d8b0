//! TradingView scanner recommendation provider

pub mod compute;
pub mod provider;

pub use provider::TradingViewProvider;
