//! Support and Resistance levels detection
//!
//! Levels are five-bar fractals: a bar whose low (high) is strictly below
//! (above) two strictly monotonic neighbours on each side. Nearby fractals are
//! then merged into price bands.

use crate::models::bars::PriceBar;
use crate::models::levels::{GroupKind, GroupedLevel, LevelKind, RawLevel};

/// Default price distance for merging neighbouring levels.
pub const DEFAULT_GROUP_THRESHOLD: f64 = 0.15;

/// Bars needed on each side of a fractal.
const FRACTAL_WING: usize = 2;

/// Strict local minimum of lows with a monotonic two-bar run on each side.
pub fn is_support_level(bars: &[PriceBar], i: usize) -> bool {
    if i < FRACTAL_WING || i + FRACTAL_WING >= bars.len() {
        return false;
    }
    let low = |j: usize| bars[j].low;
    low(i) < low(i - 1)
        && low(i - 1) < low(i - 2)
        && low(i) < low(i + 1)
        && low(i + 1) < low(i + 2)
}

/// Strict local maximum of highs with a monotonic two-bar run on each side.
pub fn is_resistance_level(bars: &[PriceBar], i: usize) -> bool {
    if i < FRACTAL_WING || i + FRACTAL_WING >= bars.len() {
        return false;
    }
    let high = |j: usize| bars[j].high;
    high(i) > high(i - 1)
        && high(i - 1) > high(i - 2)
        && high(i) > high(i + 1)
        && high(i + 1) > high(i + 2)
}

/// Find every fractal support/resistance in bar order.
///
/// Support is tested first, so an index matching both shapes is reported as
/// Support only. Series shorter than five bars yield no levels.
pub fn identify_levels(bars: &[PriceBar]) -> Vec<RawLevel> {
    if bars.len() < 2 * FRACTAL_WING + 1 {
        return Vec::new();
    }

    let mut levels = Vec::new();
    for i in FRACTAL_WING..bars.len() - FRACTAL_WING {
        if is_support_level(bars, i) {
            levels.push(RawLevel::new(i, bars[i].low, LevelKind::Support));
        } else if is_resistance_level(bars, i) {
            levels.push(RawLevel::new(i, bars[i].high, LevelKind::Resistance));
        }
    }
    levels
}

/// Merge levels whose prices sit within `threshold` of the previously merged one.
///
/// Distance is chained: each level is compared against the last member of the
/// open group, not its first, so a long run of close levels can span more than
/// `threshold` in total.
pub fn group_levels(levels: &[RawLevel], threshold: f64) -> Vec<GroupedLevel> {
    let mut sorted: Vec<RawLevel> = levels.to_vec();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.index.cmp(&b.index)));

    let mut grouped = Vec::new();
    let mut current: Vec<RawLevel> = Vec::new();

    for level in sorted {
        match current.last() {
            Some(last) if level.price - last.price > threshold => {
                grouped.push(close_group(&current));
                current.clear();
                current.push(level);
            }
            _ => current.push(level),
        }
    }

    if !current.is_empty() {
        grouped.push(close_group(&current));
    }

    grouped
}

/// Group levels with the default threshold.
pub fn group_levels_default(levels: &[RawLevel]) -> Vec<GroupedLevel> {
    group_levels(levels, DEFAULT_GROUP_THRESHOLD)
}

fn close_group(members: &[RawLevel]) -> GroupedLevel {
    let average_price = members.iter().map(|l| l.price).sum::<f64>() / members.len() as f64;
    GroupedLevel {
        anchor_index: members[0].index,
        average_price,
        kind: GroupKind::from_kinds(members.iter().map(|l| l.kind)),
    }
}
