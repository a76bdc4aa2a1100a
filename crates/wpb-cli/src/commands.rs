use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use wpb_cache::PersistentCache;
use wpb_client::WikiFixture;
use wpb_engine::{run_batch, Reconciler, SyncConfig};
use wpb_types::Project;

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let titles = load_titles(&cli.titles)?;
    let fixture: WikiFixture = serde_json::from_str(
        &fs::read_to_string(&cli.fixture)
            .with_context(|| format!("reading fixture {}", cli.fixture.display()))?,
    )
    .with_context(|| format!("parsing fixture {}", cli.fixture.display()))?;
    let wiki = fixture.build();

    let mapping_cache = open_cache(cli.mapping_cache);
    let canonical_cache = open_cache(cli.canonical_cache);

    let mut config = SyncConfig::new(Project::new(cli.source), Project::new(cli.target));
    config.dry_run = cli.dry_run;

    info!(
        titles = titles.len(),
        source = %config.source,
        target = %config.target,
        dry_run = config.dry_run,
        "starting sync run"
    );

    let reconciler = Reconciler::new(&wiki, &wiki, &mapping_cache, &canonical_cache, &config);
    let report = run_batch(
        &reconciler,
        &titles,
        &[&mapping_cache, &canonical_cache],
        cli.flush_every,
    );
    println!("{report}");
    Ok(())
}

fn load_titles(path: &PathBuf) -> anyhow::Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading title list {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn open_cache(path: Option<PathBuf>) -> PersistentCache {
    match path {
        Some(path) => PersistentCache::load(path),
        None => PersistentCache::in_memory(),
    }
}
