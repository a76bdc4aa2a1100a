//! Reconciliation engine for WikiProject banner sync.
//!
//! For each source page the engine resolves the equivalent target page,
//! extracts the source talk page's banners, maps them through the
//! equivalence graph, merges them into the target talk page (adding
//! missing banners and raising importance ratings, never lowering
//! them), and commits only when the synthesized text differs from the
//! current revision.
//!
//! # Key Types
//!
//! - [`SyncConfig`] — project pair, naming rules, and edit behavior
//! - [`Reconciler`] — per-page state machine
//! - [`run_batch`] — sequential driver with periodic cache flushes
//! - [`PageResult`] / [`RunReport`] — per-page and aggregate outcomes

pub mod batch;
pub mod config;
pub mod decision;
pub mod engine;
pub mod report;

pub use batch::run_batch;
pub use config::SyncConfig;
pub use decision::{decide, unified_diff, Decision};
pub use engine::{MappedBanner, Reconciler};
pub use report::{PageOutcome, PageResult, RunReport};
