use tracing::{info, warn};

use wpb_cache::PersistentCache;

use crate::engine::Reconciler;
use crate::report::{PageOutcome, RunReport};

/// Process a list of source titles sequentially.
///
/// Every page runs to completion before the next begins. The resolver
/// caches are flushed every `flush_every` pages (0 disables periodic
/// flushing) and once more at the end, so an interrupted run loses at
/// most one interval of lookups. Nothing a single page does aborts the
/// batch.
pub fn run_batch(
    reconciler: &Reconciler<'_>,
    titles: &[String],
    caches: &[&PersistentCache],
    flush_every: usize,
) -> RunReport {
    let mut report = RunReport::new();
    for (i, title) in titles.iter().enumerate() {
        let result = reconciler.reconcile(title);
        match &result.outcome {
            PageOutcome::Edited { summary } => info!(%title, %summary, "edited"),
            PageOutcome::Skipped(reason) => info!(%title, %reason, "skipped"),
            PageOutcome::Failed(category) => warn!(%title, %category, "failed"),
        }
        report.record(&result);
        if flush_every > 0 && (i + 1) % flush_every == 0 {
            flush(caches);
        }
    }
    flush(caches);
    report
}

fn flush(caches: &[&PersistentCache]) {
    for cache in caches {
        if let Err(err) = cache.save() {
            warn!(%err, "cache flush failed");
        }
    }
}
