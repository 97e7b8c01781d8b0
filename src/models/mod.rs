//! Shared data models spanning the engine layers.

pub mod analysis;
pub mod bars;
pub mod chart;
pub mod levels;
pub mod signal;
pub mod trades;

pub use analysis::{AnalysisSection, Recommendation, TaAnalysis, Vote};
pub use bars::PriceBar;
pub use chart::{CandleView, LevelOverlay, OverlayColor};
pub use levels::{GroupKind, GroupedLevel, LevelKind, RawLevel};
pub use signal::{Signal, SignalDecision};
pub use trades::{RawTable, TradeMetrics, TradeRecord};
