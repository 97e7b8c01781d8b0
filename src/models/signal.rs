//! Buy/sell/hold signal models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Sell => write!(f, "Sell"),
            Signal::Hold => write!(f, "Hold"),
        }
    }
}

/// Signal plus the level bounds it was decided against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalDecision {
    pub signal: Signal,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_resistance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_support: Option<f64>,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}
