//! Levelboard: support/resistance dashboard for a single equity
//!
//! Detects fractal support and resistance levels in intraday bars, groups
//! nearby levels, classifies the latest close as Buy/Sell/Hold and serves
//! the result alongside third-party analysis and logged trade outcomes.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod stats;
