use crate::models::levels::GroupedLevel;
use crate::models::signal::{Signal, SignalDecision};
use chrono::Utc;

/// Classify a price against grouped levels.
///
/// Buy when the price is strictly above every resistance, Sell when strictly
/// below every support, Hold otherwise. Combined groups count as both.
pub fn classify(current_price: f64, levels: &[GroupedLevel]) -> Signal {
    let bounds = LevelBounds::from_levels(levels);

    match (bounds.highest_resistance, bounds.lowest_support) {
        (Some(resistance), _) if current_price > resistance => Signal::Buy,
        (_, Some(support)) if current_price < support => Signal::Sell,
        _ => Signal::Hold,
    }
}

pub struct SignalGenerator;

impl SignalGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_signal(&self, current_price: f64, levels: &[GroupedLevel]) -> SignalDecision {
        let bounds = LevelBounds::from_levels(levels);
        let signal = classify(current_price, levels);

        let reason = match signal {
            Signal::Buy => format!(
                "Price {:.2} broke above resistance {:.2}",
                current_price,
                bounds.highest_resistance.unwrap_or_default()
            ),
            Signal::Sell => format!(
                "Price {:.2} broke below support {:.2}",
                current_price,
                bounds.lowest_support.unwrap_or_default()
            ),
            Signal::Hold => match (bounds.lowest_support, bounds.highest_resistance) {
                (Some(support), Some(resistance)) => format!(
                    "Price {:.2} within support {:.2} and resistance {:.2}",
                    current_price, support, resistance
                ),
                (None, None) => format!("No levels detected around price {:.2}", current_price),
                _ => format!("Price {:.2} has not broken any level", current_price),
            },
        };

        SignalDecision {
            signal,
            price: current_price,
            highest_resistance: bounds.highest_resistance,
            lowest_support: bounds.lowest_support,
            reason,
            timestamp: Utc::now(),
        }
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new()
    }
}

struct LevelBounds {
    highest_resistance: Option<f64>,
    lowest_support: Option<f64>,
}

impl LevelBounds {
    fn from_levels(levels: &[GroupedLevel]) -> Self {
        let highest_resistance = levels
            .iter()
            .filter(|l| l.is_resistance())
            .map(|l| l.average_price)
            .reduce(f64::max);
        let lowest_support = levels
            .iter()
            .filter(|l| l.is_support())
            .map(|l| l.average_price)
            .reduce(f64::min);

        Self {
            highest_resistance,
            lowest_support,
        }
    }
}
