use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wpb",
    about = "Sync WikiProject banners between language editions",
    version,
)]
pub struct Cli {
    /// File with one source page title per line
    #[arg(long, value_name = "FILE")]
    pub titles: PathBuf,

    /// JSON wiki fixture to run against
    #[arg(long, value_name = "FILE")]
    pub fixture: PathBuf,

    /// Cross-project mapping cache file (kept in memory when omitted)
    #[arg(long, value_name = "FILE")]
    pub mapping_cache: Option<PathBuf>,

    /// Canonical-name cache file (kept in memory when omitted)
    #[arg(long, value_name = "FILE")]
    pub canonical_cache: Option<PathBuf>,

    /// Source project code
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Target project code
    #[arg(long, default_value = "zh")]
    pub target: String,

    /// Report edits without saving them
    #[arg(long)]
    pub dry_run: bool,

    /// Flush caches every N pages (0 flushes only at the end)
    #[arg(long, default_value_t = 50, value_name = "N")]
    pub flush_every: usize,

    #[arg(short, long)]
    pub verbose: bool,
}
