use std::collections::BTreeMap;
use std::fmt;

use wpb_types::{ErrorCategory, SkipReason};

/// How one page's processing ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// The candidate text differed and was handed to the save
    /// collaborator (or would have been, under dry-run).
    Edited { summary: String },
    Skipped(SkipReason),
    Failed(ErrorCategory),
}

/// The full result of reconciling one source title.
///
/// Soft errors are per-item failures that did not end the page's
/// processing; they are tallied in the run report alongside the
/// terminal outcome.
#[derive(Clone, Debug)]
pub struct PageResult {
    pub title: String,
    pub outcome: PageOutcome,
    /// Source banner names that failed mapping or canonicalization.
    pub failed_mappings: Vec<String>,
    pub soft_errors: Vec<(ErrorCategory, String)>,
}

impl PageResult {
    pub fn new(title: impl Into<String>, outcome: PageOutcome) -> Self {
        Self {
            title: title.into(),
            outcome,
            failed_mappings: Vec::new(),
            soft_errors: Vec::new(),
        }
    }
}

/// Aggregate tallies for one batch run. An explicit value, aggregated
/// by the driver; nothing here is global state.
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    pub processed: usize,
    pub edited: usize,
    pub skips: BTreeMap<SkipReason, usize>,
    pub errors: BTreeMap<ErrorCategory, usize>,
    pub failed_mappings: usize,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &PageResult) {
        self.processed += 1;
        match &result.outcome {
            PageOutcome::Edited { .. } => self.edited += 1,
            PageOutcome::Skipped(reason) => *self.skips.entry(*reason).or_default() += 1,
            PageOutcome::Failed(category) => *self.errors.entry(*category).or_default() += 1,
        }
        for (category, _) in &result.soft_errors {
            *self.errors.entry(*category).or_default() += 1;
        }
        self.failed_mappings += result.failed_mappings.len();
    }

    pub fn skipped(&self) -> usize {
        self.skips.values().sum()
    }

    pub fn errored(&self) -> usize {
        self.errors.values().sum()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "processed: {}", self.processed)?;
        writeln!(f, "edited:    {}", self.edited)?;
        writeln!(f, "skipped:   {}", self.skipped())?;
        for (reason, count) in &self.skips {
            writeln!(f, "  {reason}: {count}")?;
        }
        writeln!(f, "errors:    {}", self.errored())?;
        for (category, count) in &self.errors {
            writeln!(f, "  {category}: {count}")?;
        }
        write!(f, "failed mappings: {}", self.failed_mappings)
    }
}
