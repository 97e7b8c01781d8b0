//! Environment-driven configuration

use crate::core::scheduler::cron_expression;
use crate::error::ConfigError;
use crate::indicators::structure::DEFAULT_GROUP_THRESHOLD;
use chrono_tz::Tz;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TRADINGVIEW_BASE_URL: &str = "https://scanner.tradingview.com";

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub symbol: String,
    pub exchange: String,
    pub screener: String,
    pub bar_interval: String,
    pub bar_range: String,
    pub display_timezone: Tz,
    pub results_csv: PathBuf,
    pub level_threshold: f64,
    pub refresh_interval_seconds: u64,
    pub port: u16,
    pub yahoo_base_url: String,
    pub tradingview_base_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            exchange: "NASDAQ".to_string(),
            screener: "america".to_string(),
            bar_interval: "1m".to_string(),
            bar_range: "1d".to_string(),
            display_timezone: chrono_tz::Asia::Dhaka,
            results_csv: PathBuf::from("trading_results.csv"),
            level_threshold: DEFAULT_GROUP_THRESHOLD,
            refresh_interval_seconds: 60,
            port: 8080,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            tradingview_base_url: DEFAULT_TRADINGVIEW_BASE_URL.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup; missing or unparseable numbers
    /// keep their defaults. A refresh interval that cron cannot space evenly
    /// is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |name: &str, default: String| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let display_timezone = match lookup("DISPLAY_TIMEZONE") {
            Some(name) if !name.trim().is_empty() => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::UnknownTimezone(name.trim().to_string()))?,
            _ => defaults.display_timezone,
        };

        let level_threshold = lookup("LEVEL_THRESHOLD")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(defaults.level_threshold);
        if !(level_threshold >= 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "LEVEL_THRESHOLD",
                value: level_threshold.to_string(),
            });
        }

        let refresh_interval_seconds: u64 = lookup("REFRESH_INTERVAL_SECONDS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.refresh_interval_seconds);
        if refresh_interval_seconds != 0 && cron_expression(refresh_interval_seconds).is_none() {
            return Err(ConfigError::InvalidValue {
                name: "REFRESH_INTERVAL_SECONDS",
                value: refresh_interval_seconds.to_string(),
            });
        }

        Ok(Self {
            symbol: text("SYMBOL", defaults.symbol),
            exchange: text("EXCHANGE", defaults.exchange),
            screener: text("SCREENER", defaults.screener),
            bar_interval: text("BAR_INTERVAL", defaults.bar_interval),
            bar_range: text("BAR_RANGE", defaults.bar_range),
            display_timezone,
            results_csv: lookup("RESULTS_CSV")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.results_csv),
            level_threshold,
            refresh_interval_seconds,
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            yahoo_base_url: text("YAHOO_BASE_URL", defaults.yahoo_base_url),
            tradingview_base_url: text("TRADINGVIEW_BASE_URL", defaults.tradingview_base_url),
        })
    }
}
