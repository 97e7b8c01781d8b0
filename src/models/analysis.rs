//! Third-party technical analysis models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Five-step recommendation scale plus an error bucket for out-of-range scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongSell,
    Sell,
    Neutral,
    Buy,
    StrongBuy,
    Error,
}

impl Recommendation {
    /// Map a TradingView score in [-1, 1] onto the scale.
    pub fn from_score(score: f64) -> Self {
        if (-1.0..-0.5).contains(&score) {
            Recommendation::StrongSell
        } else if (-0.5..-0.1).contains(&score) {
            Recommendation::Sell
        } else if (-0.1..=0.1).contains(&score) {
            Recommendation::Neutral
        } else if score > 0.1 && score <= 0.5 {
            Recommendation::Buy
        } else if score > 0.5 && score <= 1.0 {
            Recommendation::StrongBuy
        } else {
            Recommendation::Error
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongSell => "STRONG_SELL",
            Recommendation::Sell => "SELL",
            Recommendation::Neutral => "NEUTRAL",
            Recommendation::Buy => "BUY",
            Recommendation::StrongBuy => "STRONG_BUY",
            Recommendation::Error => "ERROR",
        }
    }

    /// Human label with underscores replaced, e.g. `STRONG BUY`.
    pub fn display_label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vote cast by a single indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Vote {
    Buy,
    Sell,
    Neutral,
}

/// Recommendation with the vote tally behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub recommendation: Recommendation,
    pub buy: u32,
    pub sell: u32,
    pub neutral: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub compute: BTreeMap<String, Vote>,
}

impl AnalysisSection {
    pub fn new(recommendation: Recommendation) -> Self {
        Self {
            recommendation,
            buy: 0,
            sell: 0,
            neutral: 0,
            compute: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, name: &str, vote: Vote) {
        match vote {
            Vote::Buy => self.buy += 1,
            Vote::Sell => self.sell += 1,
            Vote::Neutral => self.neutral += 1,
        }
        self.compute.insert(name.to_string(), vote);
    }
}

/// Full analysis for one symbol/interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaAnalysis {
    pub symbol: String,
    pub exchange: String,
    pub screener: String,
    pub interval: String,
    pub summary: AnalysisSection,
    pub moving_averages: AnalysisSection,
    pub oscillators: AnalysisSection,
    pub indicators: BTreeMap<String, f64>,
}
