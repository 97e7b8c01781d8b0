//! Chart-facing views of bars and levels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayColor {
    Blue,
    Red,
}

/// Horizontal level line drawn from its anchor bar to the last bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelOverlay {
    pub start: String,
    pub end: String,
    pub price: f64,
    pub label: String,
    pub color: OverlayColor,
}

/// Candle with its timestamp rendered in the display timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleView {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
