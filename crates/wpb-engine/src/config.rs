use std::collections::HashSet;
use std::time::Duration;

use wpb_extract::BannerRules;
use wpb_resolve::mapping::DEFAULT_COOLDOWN;
use wpb_types::Project;

/// One sync run's configuration: the project pair, naming rules on both
/// sides, and edit behavior.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    pub source: Project,
    pub target: Project,
    /// Rules for recognizing banners on the source project.
    pub source_rules: BannerRules,
    /// Shell template names on the target project, lowercase.
    pub target_shell_names: HashSet<String>,
    /// Shell name used when synthesizing a fresh shell.
    pub default_shell_name: String,
    /// Fixed prefix of every edit summary.
    pub summary_prefix: String,
    /// Name of the parameter carrying a banner's rating.
    pub importance_param: String,
    pub bot_flag: bool,
    pub dry_run: bool,
    /// Pause after a rate-limited save or mapping lookup.
    pub cooldown: Duration,
}

impl SyncConfig {
    pub fn new(source: Project, target: Project) -> Self {
        Self {
            source,
            target,
            source_rules: BannerRules::default(),
            target_shell_names: default_target_shell_names(),
            default_shell_name: "WikiProject banner shell".to_string(),
            summary_prefix: "Syncing WikiProject banners".to_string(),
            importance_param: wpb_extract::IMPORTANCE_PARAM.to_string(),
            bot_flag: true,
            dry_run: false,
            cooldown: DEFAULT_COOLDOWN,
        }
    }

    pub fn is_target_shell(&self, name: &str) -> bool {
        self.target_shell_names.contains(&name.to_lowercase())
    }
}

impl Default for SyncConfig {
    /// The en→zh configuration the bot runs with.
    fn default() -> Self {
        Self::new(Project::new("en"), Project::new("zh"))
    }
}

/// Shell names in use on the Chinese Wikipedia, lowercase (including
/// local aliases and known redirects).
fn default_target_shell_names() -> HashSet<String> {
    [
        "wikiproject banner shell",
        "wpbs",
        "wpbannershell",
        "wikiprojectbanners",
        "multiple wikiprojects",
        "wikiprojectbannershell",
        "多个专题",
        "wikiproject shell",
    ]
    .map(String::from)
    .into()
}
