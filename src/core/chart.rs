//! Chart views: candles and level overlays in the display timezone

use crate::models::bars::PriceBar;
use crate::models::chart::{CandleView, LevelOverlay, OverlayColor};
use crate::models::levels::GroupedLevel;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_time(timestamp: DateTime<Utc>, tz: Tz) -> String {
    timestamp.with_timezone(&tz).format(TIME_FORMAT).to_string()
}

pub fn candles(bars: &[PriceBar], tz: Tz) -> Vec<CandleView> {
    bars.iter()
        .map(|b| CandleView {
            time: format_time(b.timestamp, tz),
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
        })
        .collect()
}

/// One line per group, from its anchor bar to the last bar.
///
/// Groups whose anchor falls outside `bars` are skipped.
pub fn plot_levels(bars: &[PriceBar], levels: &[GroupedLevel], tz: Tz) -> Vec<LevelOverlay> {
    let Some(last) = bars.last() else {
        return Vec::new();
    };
    let end = format_time(last.timestamp, tz);

    levels
        .iter()
        .filter_map(|level| {
            let anchor = bars.get(level.anchor_index)?;
            Some(LevelOverlay {
                start: format_time(anchor.timestamp, tz),
                end: end.clone(),
                price: level.average_price,
                label: level.kind.label(),
                color: if level.is_support() {
                    OverlayColor::Blue
                } else {
                    OverlayColor::Red
                },
            })
        })
        .collect()
}
