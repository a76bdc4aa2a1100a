use similar::TextDiff;

use wpb_types::SkipReason;

/// Outcome of the textual change decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Commit,
    Skip(SkipReason),
}

/// Compare the synthesized text against the original revision (the
/// empty string when the page did not exist) and decide whether to
/// commit.
pub fn decide(original: &str, candidate: &str, page_existed: bool) -> Decision {
    if candidate != original {
        return Decision::Commit;
    }
    if !page_existed && candidate.trim().is_empty() {
        Decision::Skip(SkipReason::CreationSkippedEmpty)
    } else {
        Decision::Skip(SkipReason::NoChangeNeeded)
    }
}

/// Unified diff between the original and candidate text, for logging
/// before a commit.
pub fn unified_diff(original: &str, candidate: &str) -> String {
    TextDiff::from_lines(original, candidate)
        .unified_diff()
        .header("current", "candidate")
        .to_string()
}
