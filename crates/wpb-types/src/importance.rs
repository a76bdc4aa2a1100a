//! The importance ordinal scale and the upgrade rule.
//!
//! Ratings live in wikitext as free-form strings (`importance=High`).
//! The engine never rewrites a rating into a canonical form; it only
//! compares ordinals to decide whether a target rating must be raised.

/// Ordinal importance rating. Higher ordinal wins.
///
/// An absent or unrecognized rating has ordinal 0 and never wins a
/// comparison; see [`outranks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Importance {
    NotApplicable = 1,
    Bottom = 2,
    Low = 3,
    Mid = 4,
    High = 5,
    Top = 6,
}

impl Importance {
    /// Parse a raw rating string, case-insensitively, after trimming.
    ///
    /// `"na"` and `"no"` are both treated as [`Importance::NotApplicable`].
    /// Returns `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "top" => Some(Self::Top),
            "high" => Some(Self::High),
            "mid" => Some(Self::Mid),
            "low" => Some(Self::Low),
            "bottom" => Some(Self::Bottom),
            "na" | "no" => Some(Self::NotApplicable),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Ordinal of an optional raw rating string. Absent or unrecognized = 0.
pub fn rating_ordinal(raw: Option<&str>) -> u8 {
    raw.and_then(Importance::parse)
        .map(Importance::ordinal)
        .unwrap_or(0)
}

/// The sole decision input for importance upgrades.
///
/// Returns `true` iff `candidate` carries a recognized rating strictly
/// above `current`. An absent or unrecognized candidate never wins, so
/// the policy never downgrades and never invents a rating.
pub fn outranks(candidate: Option<&str>, current: Option<&str>) -> bool {
    let c = rating_ordinal(candidate);
    c > 0 && c > rating_ordinal(current)
}
