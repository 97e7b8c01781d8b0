//! Indicator votes derived from scanner values
//!
//! Each rule mirrors how the scanner's own summary reads an indicator:
//! moving averages vote against the close, oscillators vote on their
//! current value and the previous bar's value. Indicators the scanner
//! already rates (`Rec.*` columns, -1, 0 or 1) are taken as they are.

use crate::models::analysis::{AnalysisSection, Recommendation, Vote};
use std::collections::BTreeMap;

pub const MA_PERIODS: [u32; 6] = [10, 20, 30, 50, 100, 200];

/// Scanner columns requested for every analysis, before the interval suffix.
pub fn indicator_columns() -> Vec<String> {
    let mut columns: Vec<String> = [
        "Recommend.Other",
        "Recommend.All",
        "Recommend.MA",
        "RSI",
        "RSI[1]",
        "Stoch.K",
        "Stoch.D",
        "Stoch.K[1]",
        "Stoch.D[1]",
        "CCI20",
        "CCI20[1]",
        "ADX",
        "ADX+DI",
        "ADX-DI",
        "ADX+DI[1]",
        "ADX-DI[1]",
        "AO",
        "AO[1]",
        "AO[2]",
        "Mom",
        "Mom[1]",
        "MACD.macd",
        "MACD.signal",
        "Stoch.RSI.K",
        "Stoch.RSI.K[1]",
        "W.R",
        "W.R[1]",
        "BBPower",
        "BBPower[1]",
        "UO",
        "Ichimoku.BLine",
        "VWMA",
        "HullMA9",
        "Rec.Stoch.RSI",
        "Rec.WR",
        "Rec.BBPower",
        "Rec.UO",
        "Rec.Ichimoku",
        "Rec.VWMA",
        "Rec.HullMA9",
        "close",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();

    for period in MA_PERIODS {
        columns.push(format!("EMA{}", period));
        columns.push(format!("SMA{}", period));
    }
    columns
}

pub fn ma_vote(ma: f64, close: f64) -> Vote {
    if ma < close {
        Vote::Buy
    } else if ma > close {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn rsi_vote(rsi: f64, rsi_prev: f64) -> Vote {
    if rsi < 30.0 && rsi_prev < rsi {
        Vote::Buy
    } else if rsi > 70.0 && rsi_prev > rsi {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn stoch_vote(k: f64, d: f64, k_prev: f64, d_prev: f64) -> Vote {
    if k < 20.0 && d < 20.0 && k > d && k_prev < d_prev {
        Vote::Buy
    } else if k > 80.0 && d > 80.0 && k < d && k_prev > d_prev {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn cci_vote(cci: f64, cci_prev: f64) -> Vote {
    if cci < -100.0 && cci > cci_prev {
        Vote::Buy
    } else if cci > 100.0 && cci < cci_prev {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn adx_vote(adx: f64, plus_di: f64, minus_di: f64, plus_di_prev: f64, minus_di_prev: f64) -> Vote {
    if adx > 20.0 && plus_di_prev < minus_di_prev && plus_di > minus_di {
        Vote::Buy
    } else if adx > 20.0 && plus_di_prev > minus_di_prev && plus_di < minus_di {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn ao_vote(ao: f64, ao_prev: f64, ao_prev2: f64) -> Vote {
    if (ao > 0.0 && ao_prev < 0.0) || (ao > 0.0 && ao_prev > 0.0 && ao > ao_prev && ao_prev2 > ao_prev) {
        Vote::Buy
    } else if (ao < 0.0 && ao_prev > 0.0)
        || (ao < 0.0 && ao_prev < 0.0 && ao < ao_prev && ao_prev2 < ao_prev)
    {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

pub fn momentum_vote(mom: f64, mom_prev: f64) -> Vote {
    if mom < mom_prev {
        Vote::Sell
    } else if mom > mom_prev {
        Vote::Buy
    } else {
        Vote::Neutral
    }
}

pub fn macd_vote(macd: f64, signal: f64) -> Vote {
    if macd > signal {
        Vote::Buy
    } else if macd < signal {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// Vote from a scanner rating: 1 is Buy, -1 is Sell, anything else Neutral.
pub fn simple_vote(rating: f64) -> Vote {
    if rating == 1.0 {
        Vote::Buy
    } else if rating == -1.0 {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// Sections built from one scanner row.
pub struct ComputedAnalysis {
    pub summary: AnalysisSection,
    pub moving_averages: AnalysisSection,
    pub oscillators: AnalysisSection,
}

/// Build the summary, moving-average and oscillator sections.
///
/// Indicators whose inputs are missing from `values` cast no vote.
pub fn compute_sections(values: &BTreeMap<String, f64>) -> ComputedAnalysis {
    let get = |name: &str| values.get(name).copied();
    let recommendation = |name: &str| {
        get(name)
            .map(Recommendation::from_score)
            .unwrap_or(Recommendation::Error)
    };

    let mut oscillators = AnalysisSection::new(recommendation("Recommend.Other"));
    let mut moving_averages = AnalysisSection::new(recommendation("Recommend.MA"));

    if let Some(close) = get("close") {
        for period in MA_PERIODS {
            for kind in ["EMA", "SMA"] {
                let name = format!("{}{}", kind, period);
                if let Some(ma) = get(&name) {
                    moving_averages.record(&name, ma_vote(ma, close));
                }
            }
        }
    }
    for (name, column) in [
        ("Ichimoku", "Rec.Ichimoku"),
        ("VWMA", "Rec.VWMA"),
        ("HullMA", "Rec.HullMA9"),
    ] {
        if let Some(rating) = get(column) {
            moving_averages.record(name, simple_vote(rating));
        }
    }

    if let (Some(rsi), Some(prev)) = (get("RSI"), get("RSI[1]")) {
        oscillators.record("RSI", rsi_vote(rsi, prev));
    }
    if let (Some(k), Some(d), Some(k1), Some(d1)) =
        (get("Stoch.K"), get("Stoch.D"), get("Stoch.K[1]"), get("Stoch.D[1]"))
    {
        oscillators.record("STOCH.K", stoch_vote(k, d, k1, d1));
    }
    if let (Some(cci), Some(prev)) = (get("CCI20"), get("CCI20[1]")) {
        oscillators.record("CCI", cci_vote(cci, prev));
    }
    if let (Some(adx), Some(pdi), Some(ndi), Some(pdi1), Some(ndi1)) = (
        get("ADX"),
        get("ADX+DI"),
        get("ADX-DI"),
        get("ADX+DI[1]"),
        get("ADX-DI[1]"),
    ) {
        oscillators.record("ADX", adx_vote(adx, pdi, ndi, pdi1, ndi1));
    }
    if let (Some(ao), Some(ao1), Some(ao2)) = (get("AO"), get("AO[1]"), get("AO[2]")) {
        oscillators.record("AO", ao_vote(ao, ao1, ao2));
    }
    if let (Some(mom), Some(prev)) = (get("Mom"), get("Mom[1]")) {
        oscillators.record("Mom", momentum_vote(mom, prev));
    }
    if let (Some(macd), Some(signal)) = (get("MACD.macd"), get("MACD.signal")) {
        oscillators.record("MACD", macd_vote(macd, signal));
    }
    for (name, column) in [
        ("Stoch.RSI", "Rec.Stoch.RSI"),
        ("W%R", "Rec.WR"),
        ("BBP", "Rec.BBPower"),
        ("UO", "Rec.UO"),
    ] {
        if let Some(rating) = get(column) {
            oscillators.record(name, simple_vote(rating));
        }
    }

    let summary = AnalysisSection {
        recommendation: recommendation("Recommend.All"),
        buy: oscillators.buy + moving_averages.buy,
        sell: oscillators.sell + moving_averages.sell,
        neutral: oscillators.neutral + moving_averages.neutral,
        compute: BTreeMap::new(),
    };

    ComputedAnalysis {
        summary,
        moving_averages,
        oscillators,
    }
}
