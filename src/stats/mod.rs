//! Trade outcome statistics

use crate::models::trades::{TradeMetrics, TradeRecord};

/// Summarise logged predictions.
///
/// Rows whose outcome is neither true nor false, or that lack either price,
/// are ignored. A zero loss sum
/// is treated as 1 when computing the profit factor, and averages over no
/// rows are 0.
pub fn calculate_metrics(records: &[TradeRecord]) -> TradeMetrics {
    let win_moves: Vec<f64> = records
        .iter()
        .filter(|r| r.prediction_correct == Some(true))
        .filter_map(TradeRecord::price_move)
        .collect();
    let loss_moves: Vec<f64> = records
        .iter()
        .filter(|r| r.prediction_correct == Some(false))
        .filter_map(|r| r.price_move().map(|m| -m))
        .collect();

    let wins = win_moves.len();
    let losses = loss_moves.len();
    let total = wins + losses;

    let (win_ratio, loss_ratio) = if total > 0 {
        (wins as f64 / total as f64, losses as f64 / total as f64)
    } else {
        (0.0, 0.0)
    };

    let gross_win: f64 = win_moves.iter().sum();
    let gross_loss: f64 = loss_moves.iter().sum();
    let profit_factor = gross_win / if gross_loss == 0.0 { 1.0 } else { gross_loss };

    TradeMetrics {
        wins,
        losses,
        win_ratio,
        loss_ratio,
        profit_factor,
        average_win: mean(&win_moves),
        average_loss: mean(&loss_moves),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
