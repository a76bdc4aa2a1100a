use std::collections::btree_map::{BTreeMap, Entry};
use std::thread;

use tracing::{debug, info, warn};

use wpb_cache::PersistentCache;
use wpb_client::{ClientResult, EquivalenceGraph, SaveError, WikiClient};
use wpb_extract::extract_banners;
use wpb_resolve::{CanonicalResolver, MappingResolver};
use wpb_types::{outranks, ErrorCategory, SkipReason};
use wpb_wikitext::Document;

use crate::config::SyncConfig;
use crate::decision::{decide, unified_diff, Decision};
use crate::report::{PageOutcome, PageResult};

/// One source banner after mapping: the raw target-project template
/// name to write, plus the source importance to carry over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedBanner {
    pub raw_target: String,
    pub importance: Option<String>,
}

/// Reconciles one source page at a time against its target-project
/// counterpart.
///
/// Each call to [`Reconciler::reconcile`] runs the per-page state
/// machine to completion: resolve the target page, extract source
/// banners, map them through the equivalence graph, merge into the
/// target talk page, and commit when the text changed. Per-item
/// failures inside a page are recorded on the [`PageResult`]; nothing a
/// single page does can abort the batch.
pub struct Reconciler<'a> {
    client: &'a dyn WikiClient,
    graph: &'a dyn EquivalenceGraph,
    mapping: MappingResolver<'a>,
    canonical: CanonicalResolver<'a>,
    config: &'a SyncConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        client: &'a dyn WikiClient,
        graph: &'a dyn EquivalenceGraph,
        mapping_cache: &'a PersistentCache,
        canonical_cache: &'a PersistentCache,
        config: &'a SyncConfig,
    ) -> Self {
        let mapping = MappingResolver::new(
            client,
            graph,
            mapping_cache,
            config.source.clone(),
            config.target.clone(),
        )
        .with_cooldown(config.cooldown);
        let canonical = CanonicalResolver::new(client, canonical_cache, config.target.clone());
        Self {
            client,
            graph,
            mapping,
            canonical,
            config,
        }
    }

    pub fn reconcile(&self, title: &str) -> PageResult {
        let mut failed_mappings = Vec::new();
        let mut soft_errors = Vec::new();
        let outcome = self.run(title, &mut failed_mappings, &mut soft_errors);
        PageResult {
            title: title.to_string(),
            outcome,
            failed_mappings,
            soft_errors,
        }
    }

    fn run(
        &self,
        title: &str,
        failed: &mut Vec<String>,
        soft: &mut Vec<(ErrorCategory, String)>,
    ) -> PageOutcome {
        let cfg = self.config;

        // 1. Resolve the target page via the equivalence graph.
        let linked = match self.graph.equivalent_page(&cfg.source, title, &cfg.target) {
            Ok(Some(t)) => t,
            Ok(None) => {
                debug!(%title, "no equivalent target page");
                return PageOutcome::Skipped(SkipReason::NoTargetPage);
            }
            Err(err) => {
                warn!(%title, %err, "equivalence lookup failed");
                return PageOutcome::Failed(ErrorCategory::EquivalenceLookup);
            }
        };
        let target_title = match self.resolve_target_page(&linked) {
            Ok(Some(t)) => t,
            Ok(None) => {
                debug!(%title, %linked, "target page missing or unusable redirect");
                return PageOutcome::Skipped(SkipReason::NoTargetPage);
            }
            Err(err) => {
                warn!(%title, %err, "target page resolution failed");
                return PageOutcome::Failed(ErrorCategory::EquivalenceLookup);
            }
        };

        // 2. Fetch the source talk page.
        let source_talk = match self.talk_title(title) {
            Ok(t) => t,
            Err(err) => {
                warn!(%title, %err, "source talk title derivation failed");
                return PageOutcome::Failed(ErrorCategory::SourceTalkFetch);
            }
        };
        match self.client.page_exists(&cfg.source, &source_talk) {
            Ok(true) => {}
            Ok(false) => return PageOutcome::Skipped(SkipReason::NoSourceTalk),
            Err(err) => {
                warn!(title = %source_talk, %err, "source talk existence check failed");
                return PageOutcome::Failed(ErrorCategory::SourceTalkFetch);
            }
        }
        match self.client.is_redirect(&cfg.source, &source_talk) {
            Ok(true) => return PageOutcome::Skipped(SkipReason::SourceTalkRedirect),
            Ok(false) => {}
            Err(err) => {
                warn!(title = %source_talk, %err, "source talk redirect check failed");
                return PageOutcome::Failed(ErrorCategory::SourceTalkFetch);
            }
        }
        let source_text = match self.client.fetch_text(&cfg.source, &source_talk) {
            Ok(t) => t,
            Err(err) => {
                warn!(title = %source_talk, %err, "source talk fetch failed");
                return PageOutcome::Failed(ErrorCategory::SourceTalkFetch);
            }
        };

        // 3. Extract the relevant source banners.
        let banners = extract_banners(&Document::parse(&source_text), &cfg.source_rules);
        if banners.is_empty() {
            return PageOutcome::Skipped(SkipReason::NoRelevantSourceBanners);
        }
        debug!(title = %source_talk, count = banners.len(), "extracted source banners");

        // 4. Map each banner through the graph, then canonicalize on the
        // target project. Collisions keep the higher rating, first seen
        // on ties.
        let mut mapped: BTreeMap<String, MappedBanner> = BTreeMap::new();
        for (name, rating) in banners.iter() {
            let raw_target = match self.mapping.resolve(name) {
                Ok(Some(t)) => t,
                Ok(None) => {
                    failed.push(name.to_string());
                    continue;
                }
                Err(err) => {
                    warn!(banner = %name, %err, "mapping lookup failed");
                    soft.push((ErrorCategory::MappingLookup, err.to_string()));
                    failed.push(name.to_string());
                    continue;
                }
            };
            let canonical = match self.canonical.resolve(&raw_target) {
                Ok(Some(c)) => c,
                Ok(None) => {
                    debug!(banner = %name, target = %raw_target, "mapped name has no canonical form");
                    failed.push(name.to_string());
                    continue;
                }
                Err(err) => {
                    warn!(banner = %name, target = %raw_target, %err, "canonicalization failed");
                    soft.push((ErrorCategory::MappingLookup, err.to_string()));
                    failed.push(name.to_string());
                    continue;
                }
            };
            let banner = MappedBanner {
                raw_target,
                importance: rating.map(str::to_string),
            };
            match mapped.entry(canonical) {
                Entry::Vacant(slot) => {
                    slot.insert(banner);
                }
                Entry::Occupied(mut slot) => {
                    if outranks(banner.importance.as_deref(), slot.get().importance.as_deref()) {
                        slot.insert(banner);
                    }
                }
            }
        }
        if mapped.is_empty() {
            return PageOutcome::Skipped(SkipReason::NoSuccessfulMapping);
        }

        // 5. Fetch the target talk page; a missing page proceeds with an
        // empty document.
        let target_talk = match self.talk_title(&target_title) {
            Ok(t) => t,
            Err(err) => {
                warn!(title = %target_title, %err, "target talk title derivation failed");
                return PageOutcome::Failed(ErrorCategory::TargetTalkFetch);
            }
        };
        let page_existed = match self.client.page_exists(&cfg.target, &target_talk) {
            Ok(e) => e,
            Err(err) => {
                warn!(title = %target_talk, %err, "target talk existence check failed");
                return PageOutcome::Failed(ErrorCategory::TargetTalkFetch);
            }
        };
        let original_text = if page_existed {
            match self.client.is_redirect(&cfg.target, &target_talk) {
                Ok(true) => return PageOutcome::Skipped(SkipReason::TargetTalkRedirect),
                Ok(false) => {}
                Err(err) => {
                    warn!(title = %target_talk, %err, "target talk redirect check failed");
                    return PageOutcome::Failed(ErrorCategory::TargetTalkFetch);
                }
            }
            match self.client.fetch_text(&cfg.target, &target_talk) {
                Ok(t) => t,
                Err(err) => {
                    warn!(title = %target_talk, %err, "target talk fetch failed");
                    return PageOutcome::Failed(ErrorCategory::TargetTalkFetch);
                }
            }
        } else {
            String::new()
        };

        // 6. Merge: upgrade ratings of existing banners in place and
        // compute the set still missing from the shell.
        let mut doc = Document::parse(&original_text);
        let shell_idx = doc
            .templates_with_index()
            .find(|(_, t)| cfg.is_target_shell(&t.name()))
            .map(|(i, _)| i);

        let mut upgraded = false;
        let mut existing: BTreeMap<String, Option<String>> = BTreeMap::new();
        let mut inner_value: Option<String> = None;

        if let Some(idx) = shell_idx {
            if let Some(mut inner) = doc.template_at(idx).and_then(|t| t.parse_param("1")) {
                let mut nested: Vec<(usize, String, Option<String>)> = Vec::new();
                for (node_idx, tpl) in inner.templates_with_index() {
                    match self.canonical.resolve(&tpl.name()) {
                        Ok(Some(canonical)) => {
                            if existing.contains_key(&canonical) {
                                continue;
                            }
                            let rating = tpl
                                .param_trimmed(&cfg.importance_param)
                                .filter(|v| !v.is_empty());
                            existing.insert(canonical.clone(), rating.clone());
                            nested.push((node_idx, canonical, rating));
                        }
                        Ok(None) => {}
                        Err(err) => {
                            warn!(banner = %tpl.name(), %err, "canonicalizing existing banner failed");
                            soft.push((ErrorCategory::Other, err.to_string()));
                        }
                    }
                }
                for (node_idx, canonical, current) in &nested {
                    let Some(banner) = mapped.get(canonical) else {
                        continue;
                    };
                    if !outranks(banner.importance.as_deref(), current.as_deref()) {
                        continue;
                    }
                    let (Some(value), Some(tpl)) = (
                        banner.importance.clone(),
                        inner.template_at_mut(*node_idx),
                    ) else {
                        continue;
                    };
                    if tpl.has_param(&cfg.importance_param) || tpl.params().is_empty() {
                        tpl.set_param(&cfg.importance_param, &value);
                    } else {
                        tpl.insert_param_front(&cfg.importance_param, &value);
                    }
                    debug!(banner = %canonical, importance = %value, "raising importance");
                    upgraded = true;
                }
                inner_value = Some(inner.to_string());
            }
        }

        let to_add: Vec<String> = mapped
            .keys()
            .filter(|k| !existing.contains_key(*k))
            .cloned()
            .collect();
        if to_add.is_empty() && !upgraded {
            return PageOutcome::Skipped(SkipReason::NoChangeNeeded);
        }
        let added: Vec<&MappedBanner> = to_add.iter().filter_map(|c| mapped.get(c)).collect();

        // 7. Synthesize the candidate document.
        let candidate = if let Some(idx) = shell_idx {
            if let Some(mut value) = inner_value {
                if !added.is_empty() {
                    let block = self.render_lines(&added);
                    if value.trim().is_empty() {
                        value = block;
                    } else {
                        if !value.ends_with('\n') {
                            value.push('\n');
                        }
                        value.push_str(&block);
                    }
                }
                if let Some(tpl) = doc.template_at_mut(idx) {
                    tpl.set_param("1", &value);
                }
            } else if !added.is_empty() {
                let value = format!("\n{}\n", self.render_lines(&added));
                if let Some(tpl) = doc.template_at_mut(idx) {
                    tpl.set_param("1", &value);
                }
            }
            doc.to_string()
        } else {
            // No shell: a fresh one carries every mapped banner, sorted
            // by canonical name, at the top of the page.
            let all: Vec<&MappedBanner> = mapped.values().collect();
            doc.prepend_text(&format!(
                "{{{{{}|1=\n{}\n}}}}\n",
                cfg.default_shell_name,
                self.render_lines(&all)
            ));
            doc.to_string().trim().to_string()
        };

        // 8. Decide and commit.
        if let Decision::Skip(reason) = decide(&original_text, &candidate, page_existed) {
            return PageOutcome::Skipped(reason);
        }
        debug!(title = %target_talk, diff = %unified_diff(&original_text, &candidate), "candidate differs");

        let mut actions = Vec::new();
        if !added.is_empty() {
            let mut names: Vec<&str> = added.iter().map(|b| b.raw_target.as_str()).collect();
            names.sort_unstable();
            actions.push(format!("+{}", names.join(", ")));
        }
        if upgraded {
            actions.push("update importance".to_string());
        }
        let summary = format!("{}: {}", cfg.summary_prefix, actions.join("; "));

        if cfg.dry_run {
            info!(title = %target_talk, %summary, "dry run, not saving");
            return PageOutcome::Edited { summary };
        }
        match self
            .client
            .save(&cfg.target, &target_talk, &candidate, &summary, cfg.bot_flag)
        {
            Ok(()) => {
                info!(title = %target_talk, %summary, "saved");
                PageOutcome::Edited { summary }
            }
            Err(SaveError::RateLimited) => {
                warn!(
                    title = %target_talk,
                    cooldown_secs = cfg.cooldown.as_secs(),
                    "rate limited on save, pausing"
                );
                thread::sleep(cfg.cooldown);
                PageOutcome::Failed(ErrorCategory::Save)
            }
            Err(err) => {
                warn!(title = %target_talk, %err, "save failed");
                PageOutcome::Failed(ErrorCategory::Save)
            }
        }
    }

    /// Existing, non-redirect target page for a linked title, following
    /// at most one redirect hop. A chain or cycle resolves to `None`.
    fn resolve_target_page(&self, title: &str) -> ClientResult<Option<String>> {
        let target = &self.config.target;
        if !self.client.page_exists(target, title)? {
            return Ok(None);
        }
        if !self.client.is_redirect(target, title)? {
            return Ok(Some(title.to_string()));
        }
        let Some(dest) = self.client.redirect_target(target, title)? else {
            return Ok(None);
        };
        if self.client.page_exists(target, &dest)? && !self.client.is_redirect(target, &dest)? {
            Ok(Some(dest))
        } else {
            Ok(None)
        }
    }

    /// Talk-page title for a subject title: `Talk:` on an unprefixed
    /// title, `<namespace> talk:` on a namespaced one.
    fn talk_title(&self, title: &str) -> ClientResult<String> {
        if self.client.namespace_of(&self.config.source, title)? == 0 {
            return Ok(format!("Talk:{title}"));
        }
        match title.split_once(':') {
            Some((ns, rest)) => Ok(format!("{ns} talk:{rest}")),
            None => Ok(format!("Talk:{title}")),
        }
    }

    fn render_banner(&self, banner: &MappedBanner) -> String {
        match &banner.importance {
            Some(imp) => format!(
                "{{{{{} |{}={}}}}}",
                banner.raw_target, self.config.importance_param, imp
            ),
            None => format!("{{{{{}}}}}", banner.raw_target),
        }
    }

    fn render_lines(&self, banners: &[&MappedBanner]) -> String {
        banners
            .iter()
            .map(|b| self.render_banner(b))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use wpb_client::InMemoryWiki;
    use wpb_types::Project;

    fn en() -> Project {
        Project::new("en")
    }

    fn zh() -> Project {
        Project::new("zh")
    }

    fn test_config() -> SyncConfig {
        let mut cfg = SyncConfig::default();
        cfg.cooldown = Duration::ZERO;
        cfg
    }

    /// Linked article pair plus the linked ships banner templates.
    fn base_wiki() -> InMemoryWiki {
        let wiki = InMemoryWiki::new();
        wiki.add_page(&en(), "Ship", "article");
        wiki.add_page(&zh(), "船", "文章");
        wiki.link(&en(), "Ship", &zh(), "船");
        wiki.add_page(&en(), "Template:WikiProject Ships", "banner");
        wiki.add_page(&zh(), "Template:船舶专题", "banner");
        wiki.link(
            &en(),
            "Template:WikiProject Ships",
            &zh(),
            "Template:船舶专题",
        );
        wiki
    }

    fn run_with(wiki: &InMemoryWiki, cfg: &SyncConfig, title: &str) -> PageResult {
        let mapping_cache = PersistentCache::in_memory();
        let canonical_cache = PersistentCache::in_memory();
        Reconciler::new(wiki, wiki, &mapping_cache, &canonical_cache, cfg).reconcile(title)
    }

    fn run(wiki: &InMemoryWiki, title: &str) -> PageResult {
        run_with(wiki, &test_config(), title)
    }

    // ---- end-to-end scenarios ----

    #[test]
    fn fresh_shell_synthesis_on_missing_target_talk() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");

        let result = run(&wiki, "Ship");
        assert!(matches!(result.outcome, PageOutcome::Edited { .. }));
        assert_eq!(
            wiki.page_text(&zh(), "Talk:船").unwrap(),
            "{{WikiProject banner shell|1=\n{{船舶专题 |importance=High}}\n}}"
        );
        let edit = &wiki.saved_edits()[0];
        assert!(edit.summary.contains("+船舶专题"));
        assert!(edit.bot);
    }

    #[test]
    fn importance_upgrade_edits_in_place() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=Top}}");
        wiki.add_page(
            &zh(),
            "Talk:船",
            "{{WikiProject banner shell|1=\n{{船舶专题|importance=Low}}\n}}",
        );

        let result = run(&wiki, "Ship");
        assert!(matches!(result.outcome, PageOutcome::Edited { .. }));
        let text = wiki.page_text(&zh(), "Talk:船").unwrap();
        assert_eq!(
            text,
            "{{WikiProject banner shell|1=\n{{船舶专题|importance=Top}}\n}}"
        );
        // Upgraded in place, no second invocation.
        assert_eq!(text.matches("船舶专题").count(), 1);
        assert!(wiki.saved_edits()[0].summary.contains("importance"));
    }

    #[test]
    fn unrated_source_with_existing_target_banner_is_no_change() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships}}");
        wiki.add_page(
            &zh(),
            "Talk:船",
            "{{WikiProject banner shell|1=\n{{船舶专题|importance=Mid}}\n}}",
        );

        let result = run(&wiki, "Ship");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::NoChangeNeeded)
        );
        assert_eq!(wiki.save_count(), 0);
    }

    #[test]
    fn second_run_is_idempotent() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");

        let first = run(&wiki, "Ship");
        assert!(matches!(first.outcome, PageOutcome::Edited { .. }));

        let second = run(&wiki, "Ship");
        assert_eq!(
            second.outcome,
            PageOutcome::Skipped(SkipReason::NoChangeNeeded)
        );
        assert_eq!(wiki.save_count(), 1);
    }

    #[test]
    fn new_banner_appends_to_existing_shell_on_a_new_line() {
        let wiki = base_wiki();
        wiki.add_page(&zh(), "Template:军事专题", "banner");
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");
        wiki.add_page(
            &zh(),
            "Talk:船",
            "{{WikiProject banner shell|1=\n{{军事专题}}\n}}",
        );

        let result = run(&wiki, "Ship");
        assert!(matches!(result.outcome, PageOutcome::Edited { .. }));
        assert_eq!(
            wiki.page_text(&zh(), "Talk:船").unwrap(),
            "{{WikiProject banner shell|1=\n{{军事专题}}\n{{船舶专题 |importance=High}}}}"
        );
    }

    #[test]
    fn shell_without_list_parameter_gets_one() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");
        wiki.add_page(&zh(), "Talk:船", "{{WPBS|collapsed=yes}}");

        let result = run(&wiki, "Ship");
        assert!(matches!(result.outcome, PageOutcome::Edited { .. }));
        assert_eq!(
            wiki.page_text(&zh(), "Talk:船").unwrap(),
            "{{WPBS|collapsed=yes|1=\n{{船舶专题 |importance=High}}\n}}"
        );
    }

    // ---- skips ----

    #[test]
    fn unlinked_page_skips_with_no_target_page() {
        let wiki = InMemoryWiki::new();
        wiki.add_page(&en(), "Lonely", "article");
        wiki.add_page(&en(), "Talk:Lonely", "{{WikiProject Ships}}");

        let result = run(&wiki, "Lonely");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::NoTargetPage)
        );
    }

    #[test]
    fn target_redirect_is_followed_one_hop() {
        // The article pair is linked through a target-side redirect.
        let wiki = InMemoryWiki::new();
        wiki.add_page(&en(), "Ship", "article");
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");
        wiki.add_redirect(&zh(), "旧船", "船");
        wiki.add_page(&zh(), "船", "文章");
        wiki.link(&en(), "Ship", &zh(), "旧船");
        wiki.add_page(&en(), "Template:WikiProject Ships", "banner");
        wiki.add_page(&zh(), "Template:船舶专题", "banner");
        wiki.link(
            &en(),
            "Template:WikiProject Ships",
            &zh(),
            "Template:船舶专题",
        );

        let result = run(&wiki, "Ship");
        assert!(matches!(result.outcome, PageOutcome::Edited { .. }));
        // The edit landed on the redirect destination's talk page.
        assert!(wiki.page_text(&zh(), "Talk:船").is_some());
        assert!(wiki.page_text(&zh(), "Talk:旧船").is_none());
    }

    #[test]
    fn target_redirect_cycle_skips() {
        let wiki = InMemoryWiki::new();
        wiki.add_page(&en(), "Ship", "article");
        wiki.add_redirect(&zh(), "甲", "乙");
        wiki.add_redirect(&zh(), "乙", "甲");
        wiki.link(&en(), "Ship", &zh(), "甲");

        let result = run(&wiki, "Ship");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::NoTargetPage)
        );
    }

    #[test]
    fn missing_source_talk_skips() {
        let wiki = base_wiki();
        let result = run(&wiki, "Ship");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::NoSourceTalk)
        );
    }

    #[test]
    fn source_talk_redirect_skips() {
        let wiki = base_wiki();
        wiki.add_redirect(&en(), "Talk:Ship", "Talk:Boat");

        let result = run(&wiki, "Ship");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::SourceTalkRedirect)
        );
    }

    #[test]
    fn target_talk_redirect_skips() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");
        wiki.add_redirect(&zh(), "Talk:船", "Talk:船舶");

        let result = run(&wiki, "Ship");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::TargetTalkRedirect)
        );
    }

    #[test]
    fn no_relevant_banners_skips() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{Talk header}}\nprose");

        let result = run(&wiki, "Ship");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::NoRelevantSourceBanners)
        );
    }

    // ---- mapping failures ----

    #[test]
    fn unmapped_banner_skips_with_no_successful_mapping() {
        let wiki = InMemoryWiki::new();
        wiki.add_page(&en(), "Ship", "article");
        wiki.add_page(&zh(), "船", "文章");
        wiki.link(&en(), "Ship", &zh(), "船");
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Lonely|importance=High}}");
        wiki.add_page(&en(), "Template:WikiProject Lonely", "banner");

        let result = run(&wiki, "Ship");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::NoSuccessfulMapping)
        );
        assert_eq!(result.failed_mappings, vec!["WikiProject Lonely"]);
    }

    #[test]
    fn failed_canonicalization_counts_as_failed_mapping() {
        let wiki = InMemoryWiki::new();
        wiki.add_page(&en(), "Ship", "article");
        wiki.add_page(&zh(), "船", "文章");
        wiki.link(&en(), "Ship", &zh(), "船");
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Lost|importance=Top}}");
        wiki.add_page(&en(), "Template:WikiProject Lost", "banner");
        // Linked to a target template page that does not exist.
        wiki.link(&en(), "Template:WikiProject Lost", &zh(), "Template:不存在");

        let result = run(&wiki, "Ship");
        assert_eq!(
            result.outcome,
            PageOutcome::Skipped(SkipReason::NoSuccessfulMapping)
        );
        assert_eq!(result.failed_mappings, vec!["WikiProject Lost"]);
    }

    #[test]
    fn collision_keeps_the_higher_rating() {
        let wiki = base_wiki();
        // Two source banners mapping to the same target template.
        wiki.add_page(&en(), "Template:WP Ships", "banner");
        wiki.link(&en(), "Template:WP Ships", &zh(), "Template:船舶专题");
        wiki.add_page(
            &en(),
            "Talk:Ship",
            "{{WP Ships|importance=Low}}\n{{WikiProject Ships|importance=High}}",
        );

        let result = run(&wiki, "Ship");
        assert!(matches!(result.outcome, PageOutcome::Edited { .. }));
        let text = wiki.page_text(&zh(), "Talk:船").unwrap();
        assert!(text.contains("importance=High"));
        assert!(!text.contains("importance=Low"));
        assert_eq!(text.matches("船舶专题").count(), 1);
    }

    // ---- commit behavior ----

    #[test]
    fn dry_run_reports_the_edit_without_saving() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");
        let mut cfg = test_config();
        cfg.dry_run = true;

        let result = run_with(&wiki, &cfg, "Ship");
        assert!(matches!(result.outcome, PageOutcome::Edited { .. }));
        assert_eq!(wiki.save_count(), 0);
        assert!(wiki.page_text(&zh(), "Talk:船").is_none());
    }

    #[test]
    fn locked_target_talk_is_a_save_error() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");
        wiki.lock_page(&zh(), "Talk:船");

        let result = run(&wiki, "Ship");
        assert_eq!(result.outcome, PageOutcome::Failed(ErrorCategory::Save));
        assert_eq!(wiki.save_count(), 0);
    }

    #[test]
    fn summary_lists_additions_and_upgrades() {
        let wiki = base_wiki();
        wiki.add_page(&zh(), "Template:军事专题", "banner");
        wiki.add_page(&en(), "Template:WikiProject Military history", "banner");
        wiki.link(
            &en(),
            "Template:WikiProject Military history",
            &zh(),
            "Template:军事专题",
        );
        wiki.add_page(
            &en(),
            "Talk:Ship",
            "{{WikiProject Ships|importance=Top}}\n{{WikiProject Military history|importance=Mid}}",
        );
        wiki.add_page(
            &zh(),
            "Talk:船",
            "{{WikiProject banner shell|1=\n{{船舶专题|importance=Low}}\n}}",
        );

        let result = run(&wiki, "Ship");
        let PageOutcome::Edited { summary } = &result.outcome else {
            panic!("expected an edit, got {:?}", result.outcome);
        };
        assert!(summary.contains("+军事专题"));
        assert!(summary.contains("update importance"));
    }

    #[test]
    fn existing_prose_below_a_fresh_shell_is_kept() {
        let wiki = base_wiki();
        wiki.add_page(&en(), "Talk:Ship", "{{WikiProject Ships|importance=High}}");
        wiki.add_page(&zh(), "Talk:船", "既有讨论内容。");

        let result = run(&wiki, "Ship");
        assert!(matches!(result.outcome, PageOutcome::Edited { .. }));
        assert_eq!(
            wiki.page_text(&zh(), "Talk:船").unwrap(),
            "{{WikiProject banner shell|1=\n{{船舶专题 |importance=High}}\n}}\n既有讨论内容。"
        );
    }
}
