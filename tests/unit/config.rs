//! Unit tests for environment configuration

use levelboard::config::{DashboardConfig, DEFAULT_YAHOO_BASE_URL};
use levelboard::error::ConfigError;
use std::collections::HashMap;
use std::path::PathBuf;

fn load(vars: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    DashboardConfig::from_lookup(|name| map.get(name).cloned())
}

#[test]
fn test_defaults() {
    let config = load(&[]).unwrap();
    assert_eq!(config.symbol, "AAPL");
    assert_eq!(config.exchange, "NASDAQ");
    assert_eq!(config.screener, "america");
    assert_eq!(config.bar_interval, "1m");
    assert_eq!(config.bar_range, "1d");
    assert_eq!(config.display_timezone, chrono_tz::Asia::Dhaka);
    assert_eq!(config.results_csv, PathBuf::from("trading_results.csv"));
    assert_eq!(config.level_threshold, 0.15);
    assert_eq!(config.refresh_interval_seconds, 60);
    assert_eq!(config.port, 8080);
    assert_eq!(config.yahoo_base_url, DEFAULT_YAHOO_BASE_URL);
}

#[test]
fn test_overrides() {
    let config = load(&[
        ("SYMBOL", "MSFT"),
        ("DISPLAY_TIMEZONE", "America/New_York"),
        ("LEVEL_THRESHOLD", "0.5"),
        ("PORT", "9090"),
        ("RESULTS_CSV", "/data/results.csv"),
    ])
    .unwrap();
    assert_eq!(config.symbol, "MSFT");
    assert_eq!(config.display_timezone, chrono_tz::America::New_York);
    assert_eq!(config.level_threshold, 0.5);
    assert_eq!(config.port, 9090);
    assert_eq!(config.results_csv, PathBuf::from("/data/results.csv"));
}

#[test]
fn test_unparseable_numbers_keep_defaults() {
    let config = load(&[("PORT", "eighty"), ("REFRESH_INTERVAL_SECONDS", "")]).unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.refresh_interval_seconds, 60);
}

#[test]
fn test_unknown_timezone() {
    let err = load(&[("DISPLAY_TIMEZONE", "Mars/Olympus")]).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTimezone(ref tz) if tz == "Mars/Olympus"));
}

#[test]
fn test_negative_threshold_rejected() {
    let err = load(&[("LEVEL_THRESHOLD", "-0.1")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { name: "LEVEL_THRESHOLD", .. }));
}

#[test]
fn test_refresh_interval_must_space_evenly() {
    for interval in ["45", "90", "7000"] {
        let err = load(&[("REFRESH_INTERVAL_SECONDS", interval)]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { name: "REFRESH_INTERVAL_SECONDS", ref value } if value == interval
        ));
    }
    for interval in [0, 15, 300, 7200] {
        let value = interval.to_string();
        let config = load(&[("REFRESH_INTERVAL_SECONDS", value.as_str())]).unwrap();
        assert_eq!(config.refresh_interval_seconds, interval);
    }
}
