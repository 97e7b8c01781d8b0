//! Unit tests for indicator votes built from scanner values

use levelboard::models::analysis::{Recommendation, Vote};
use levelboard::services::tradingview::compute::{
    ao_vote, compute_sections, indicator_columns, ma_vote, macd_vote, rsi_vote, simple_vote,
    stoch_vote, MA_PERIODS,
};
use levelboard::services::tradingview::provider::interval_suffix;
use std::collections::BTreeMap;

fn values(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_columns_include_every_moving_average() {
    let columns = indicator_columns();
    for period in MA_PERIODS {
        assert!(columns.contains(&format!("EMA{}", period)));
        assert!(columns.contains(&format!("SMA{}", period)));
    }
    assert!(columns.contains(&"Recommend.All".to_string()));
    for rated in [
        "Rec.Ichimoku",
        "Rec.VWMA",
        "Rec.HullMA9",
        "Rec.Stoch.RSI",
        "Rec.WR",
        "Rec.BBPower",
        "Rec.UO",
    ] {
        assert!(columns.contains(&rated.to_string()), "missing {}", rated);
    }
}

#[test]
fn test_interval_suffixes() {
    assert_eq!(interval_suffix("1m").unwrap(), "|1");
    assert_eq!(interval_suffix("1h").unwrap(), "|60");
    assert_eq!(interval_suffix("1d").unwrap(), "");
    assert!(interval_suffix("3m").is_err());
}

#[test]
fn test_single_votes() {
    assert_eq!(ma_vote(99.0, 100.0), Vote::Buy);
    assert_eq!(ma_vote(101.0, 100.0), Vote::Sell);
    assert_eq!(ma_vote(100.0, 100.0), Vote::Neutral);
    assert_eq!(rsi_vote(25.0, 20.0), Vote::Buy);
    assert_eq!(rsi_vote(75.0, 80.0), Vote::Sell);
    assert_eq!(rsi_vote(50.0, 40.0), Vote::Neutral);
    assert_eq!(stoch_vote(15.0, 10.0, 5.0, 8.0), Vote::Buy);
    assert_eq!(macd_vote(0.5, 0.2), Vote::Buy);
    assert_eq!(ao_vote(1.0, -1.0, 0.0), Vote::Buy);
    assert_eq!(ao_vote(-1.0, 1.0, 0.0), Vote::Sell);
}

#[test]
fn test_sections_from_values() {
    let computed = compute_sections(&values(&[
        ("Recommend.All", 0.3),
        ("Recommend.MA", 0.6),
        ("Recommend.Other", -0.2),
        ("close", 100.0),
        ("EMA10", 99.0),
        ("SMA10", 101.0),
        ("EMA20", 98.0),
        ("RSI", 50.0),
        ("RSI[1]", 45.0),
        ("MACD.macd", 1.0),
        ("MACD.signal", 0.5),
    ]));

    assert_eq!(computed.summary.recommendation, Recommendation::Buy);
    assert_eq!(computed.moving_averages.recommendation, Recommendation::StrongBuy);
    assert_eq!(computed.oscillators.recommendation, Recommendation::Sell);

    assert_eq!(computed.moving_averages.buy, 2);
    assert_eq!(computed.moving_averages.sell, 1);
    assert_eq!(computed.oscillators.buy, 1);
    assert_eq!(computed.oscillators.neutral, 1);

    assert_eq!(computed.summary.buy, 3);
    assert_eq!(computed.summary.sell, 1);
    assert_eq!(computed.summary.neutral, 1);
}

#[test]
fn test_simple_vote() {
    assert_eq!(simple_vote(1.0), Vote::Buy);
    assert_eq!(simple_vote(-1.0), Vote::Sell);
    assert_eq!(simple_vote(0.0), Vote::Neutral);
    assert_eq!(simple_vote(0.5), Vote::Neutral);
}

#[test]
fn test_rated_indicators_vote() {
    let computed = compute_sections(&values(&[
        ("Recommend.All", 0.0),
        ("Recommend.MA", 0.0),
        ("Recommend.Other", 0.0),
        ("Rec.Ichimoku", 1.0),
        ("Rec.VWMA", -1.0),
        ("Rec.HullMA9", 1.0),
        ("Rec.Stoch.RSI", 0.0),
        ("Rec.WR", 1.0),
        ("Rec.BBPower", -1.0),
        ("Rec.UO", -1.0),
    ]));

    let ma = &computed.moving_averages;
    assert_eq!(ma.compute.get("Ichimoku"), Some(&Vote::Buy));
    assert_eq!(ma.compute.get("VWMA"), Some(&Vote::Sell));
    assert_eq!(ma.compute.get("HullMA"), Some(&Vote::Buy));
    assert_eq!((ma.buy, ma.sell, ma.neutral), (2, 1, 0));

    let osc = &computed.oscillators;
    assert_eq!(osc.compute.get("Stoch.RSI"), Some(&Vote::Neutral));
    assert_eq!(osc.compute.get("W%R"), Some(&Vote::Buy));
    assert_eq!(osc.compute.get("BBP"), Some(&Vote::Sell));
    assert_eq!(osc.compute.get("UO"), Some(&Vote::Sell));
    assert_eq!((osc.buy, osc.sell, osc.neutral), (1, 2, 1));

    assert_eq!(computed.summary.buy, 3);
    assert_eq!(computed.summary.sell, 3);
    assert_eq!(computed.summary.neutral, 1);
}

#[test]
fn test_missing_scores_are_error() {
    let computed = compute_sections(&BTreeMap::new());
    assert_eq!(computed.summary.recommendation, Recommendation::Error);
    assert_eq!(computed.summary.buy + computed.summary.sell + computed.summary.neutral, 0);
}
