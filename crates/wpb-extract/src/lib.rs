//! Banner extraction.
//!
//! Scans a parsed talk page for WikiProject banner invocations: the
//! nested contents of the first banner-shell invocation, plus every
//! relevant top-level invocation outside a shell. Produces a
//! [`BannerSet`] of raw banner names with their importance ratings.

use std::collections::HashSet;

use tracing::debug;

use wpb_types::BannerSet;
use wpb_wikitext::{Document, Template};

/// The parameter carrying a banner's importance rating.
pub const IMPORTANCE_PARAM: &str = "importance";

/// Naming rules for recognizing banners and banner shells.
///
/// All matching is case-insensitive against lowercase sets; names are
/// normalized (trimmed, underscores to spaces) by the template model
/// before they get here.
#[derive(Clone, Debug)]
pub struct BannerRules {
    /// Shell template names, lowercase (including known redirects).
    shell_names: HashSet<String>,
    /// Prefixes marking a banner as project classification, lowercase,
    /// each ending in a space ("wikiproject ", "wp ").
    marker_prefixes: Vec<String>,
    /// Excluded projects, keyed by normalized full project name
    /// ("wikiproject <subject>"), lowercase.
    excluded_projects: HashSet<String>,
}

impl BannerRules {
    pub fn new(
        shell_names: impl IntoIterator<Item = String>,
        marker_prefixes: impl IntoIterator<Item = String>,
        excluded_projects: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            shell_names: shell_names.into_iter().map(|s| s.to_lowercase()).collect(),
            marker_prefixes: marker_prefixes
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
            excluded_projects: excluded_projects
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    pub fn is_shell(&self, name: &str) -> bool {
        self.shell_names.contains(&name.to_lowercase())
    }

    /// A banner is relevant when its name starts with a project marker
    /// and its normalized subject is not excluded.
    pub fn is_relevant(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        if !self.marker_prefixes.iter().any(|p| lower.starts_with(p.as_str())) {
            return false;
        }
        let subject = lower.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
        !self
            .excluded_projects
            .contains(&format!("wikiproject {subject}"))
    }
}

impl Default for BannerRules {
    /// The English Wikipedia rules the sync bot runs with.
    fn default() -> Self {
        Self::new(
            [
                "wikiproject banner shell",
                "wpbs",
                "wikiprojectbanners",
                "wikiproject banners",
                "wpb",
                "wikiproject cooperation shell",
                "wikiprojectbannershell",
                "wpbannershell",
            ]
            .map(String::from),
            ["wikiproject ", "wp "].map(String::from),
            [
                "wikiproject articles for creation",
                "wikiproject spoken wikipedia",
            ]
            .map(String::from),
        )
    }
}

fn record(set: &mut BannerSet, tpl: &Template, rules: &BannerRules) {
    let name = tpl.name();
    if !rules.is_relevant(&name) {
        return;
    }
    let importance = tpl
        .param_trimmed(IMPORTANCE_PARAM)
        .filter(|v| !v.is_empty());
    set.insert(name, importance);
}

/// Extract every relevant banner from a talk page document.
///
/// Top-level invocations are walked in document order. The first shell
/// invocation has its first positional parameter re-parsed and its
/// nested banners recorded; later shells are ignored. Every non-shell
/// top-level invocation gets the same relevance test directly. The
/// prefer-rated merge rule of [`BannerSet`] applies across both scopes.
pub fn extract_banners(doc: &Document, rules: &BannerRules) -> BannerSet {
    let mut set = BannerSet::new();
    let mut shell_seen = false;
    for tpl in doc.templates() {
        let name = tpl.name();
        if rules.is_shell(&name) {
            if shell_seen {
                continue;
            }
            shell_seen = true;
            debug!(shell = %name, "found banner shell");
            if let Some(inner) = tpl.parse_param("1") {
                for nested in inner.templates() {
                    record(&mut set, nested, rules);
                }
            }
        } else {
            record(&mut set, tpl, rules);
        }
    }
    set
}
