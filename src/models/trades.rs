//! Trade results log models.

use serde::{Deserialize, Serialize};

/// Outcome of one logged prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// `None` when the log row holds neither `True` nor `False`.
    pub prediction_correct: Option<bool>,
    /// `None` when the cell is blank, as on a row still waiting for its next bar.
    pub current_price: Option<f64>,
    pub next_price: Option<f64>,
}

impl TradeRecord {
    pub fn new(prediction_correct: Option<bool>, current_price: f64, next_price: f64) -> Self {
        Self {
            prediction_correct,
            current_price: Some(current_price),
            next_price: Some(next_price),
        }
    }

    /// `next - current`, when both prices are present.
    pub fn price_move(&self) -> Option<f64> {
        Some(self.next_price? - self.current_price?)
    }
}

/// Aggregated statistics over the results log.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TradeMetrics {
    pub wins: usize,
    pub losses: usize,
    pub win_ratio: f64,
    pub loss_ratio: f64,
    pub profit_factor: f64,
    pub average_win: f64,
    pub average_loss: f64,
}

/// Untyped view of the results log for the raw data page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
