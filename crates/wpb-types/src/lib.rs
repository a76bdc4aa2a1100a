//! Foundation types for the WikiProject banner sync engine (WPB).
//!
//! This crate provides the small vocabulary shared by every other WPB
//! crate: project identifiers, the importance ordinal scale, the banner
//! set produced by extraction, and the skip/error taxonomy used by the
//! run report.
//!
//! # Key Types
//!
//! - [`Project`] — identifier for one wiki project (language edition)
//! - [`Importance`] — ordinal importance rating with the upgrade rule
//!   [`outranks`]
//! - [`BannerSet`] — raw banner name → rating-or-absent, with the
//!   prefer-rated merge rule
//! - [`SkipReason`] / [`ErrorCategory`] — per-page business outcomes and
//!   failure categories

pub mod banner;
pub mod importance;
pub mod outcome;
pub mod project;

pub use banner::BannerSet;
pub use importance::{outranks, rating_ordinal, Importance};
pub use outcome::{ErrorCategory, SkipReason};
pub use project::Project;

/// Normalize a page or template name for lookups: trim surrounding
/// whitespace and replace underscores with spaces. Casing is preserved;
/// case-insensitive matching is the caller's concern.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().replace('_', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_replaces_underscores() {
        assert_eq!(normalize_name("  WikiProject_Ships "), "WikiProject Ships");
        assert_eq!(normalize_name("already clean"), "already clean");
    }

    #[test]
    fn normalize_preserves_case() {
        assert_eq!(normalize_name("WikiProject SHIPS"), "WikiProject SHIPS");
    }

    #[test]
    fn normalize_trims_after_underscore_replacement() {
        // A trailing underscore becomes a trailing space and must go too.
        assert_eq!(normalize_name("_Ships_"), "Ships");
    }
}
