//! Support/resistance level models.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Shape of a fractal extremum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKind {
    Support,
    Resistance,
}

impl LevelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelKind::Support => "Support",
            LevelKind::Resistance => "Resistance",
        }
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected extremum, pointing back into the bar sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawLevel {
    pub index: usize,
    pub price: f64,
    pub kind: LevelKind,
}

impl RawLevel {
    pub fn new(index: usize, price: f64, kind: LevelKind) -> Self {
        Self { index, price, kind }
    }
}

/// Distinct kinds present in a group, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GroupKind {
    kinds: Vec<LevelKind>,
}

impl GroupKind {
    pub fn from_kinds<I: IntoIterator<Item = LevelKind>>(kinds: I) -> Self {
        let mut kinds: Vec<LevelKind> = kinds.into_iter().collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds.dedup();
        Self { kinds }
    }

    pub fn contains(&self, kind: LevelKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn kinds(&self) -> &[LevelKind] {
        &self.kinds
    }

    /// Kind names joined with `-`, e.g. `Resistance-Support`.
    pub fn label(&self) -> String {
        self.kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for GroupKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// A band of nearby levels merged into one averaged price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedLevel {
    pub anchor_index: usize,
    pub average_price: f64,
    pub kind: GroupKind,
}

impl GroupedLevel {
    pub fn is_support(&self) -> bool {
        self.kind.contains(LevelKind::Support)
    }

    pub fn is_resistance(&self) -> bool {
        self.kind.contains(LevelKind::Resistance)
    }
}
