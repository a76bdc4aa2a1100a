use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use wpb_cache::PersistentCache;
use wpb_client::{ClientError, ClientResult, EquivalenceGraph, WikiClient, TEMPLATE_NAMESPACE};
use wpb_types::{normalize_name, Project};

use crate::error::{ResolveError, ResolveResult};
use crate::{bare_template_name, has_template_prefix};

/// Pause after a rate-limited mapping lookup before handing control
/// back to the caller.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10);

/// Resolves a source-project template name to the equivalent
/// target-project template name via the equivalence graph.
///
/// The result is a raw target name: canonicalizing it (redirect
/// resolution on the target project) is the caller's separate step, so
/// the cache stays valid regardless of target-side redirect churn. The
/// cache is keyed by the source name only.
pub struct MappingResolver<'a> {
    client: &'a dyn WikiClient,
    graph: &'a dyn EquivalenceGraph,
    cache: &'a PersistentCache,
    source: Project,
    target: Project,
    cooldown: Duration,
}

impl<'a> MappingResolver<'a> {
    pub fn new(
        client: &'a dyn WikiClient,
        graph: &'a dyn EquivalenceGraph,
        cache: &'a PersistentCache,
        source: Project,
        target: Project,
    ) -> Self {
        Self {
            client,
            graph,
            cache,
            source,
            target,
            cooldown: DEFAULT_COOLDOWN,
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Raw target-project template name for `raw`, or `None` when the
    /// graph links nothing usable.
    pub fn resolve(&self, raw: &str) -> ResolveResult<Option<String>> {
        let query = bare_template_name(raw);
        if query.is_empty() {
            return Ok(None);
        }
        if let Some(cached) = self.cache.get(&query) {
            debug!(name = %query, "mapping cache hit");
            return Ok(cached);
        }
        debug!(name = %query, source = %self.source, target = %self.target, "mapping lookup");

        let mapped = match self.lookup(&query) {
            Ok(v) => v,
            Err(ClientError::InvalidTitle { title }) => {
                warn!(%title, "invalid title during mapping lookup, treating as absent");
                None
            }
            Err(ClientError::RateLimited) => {
                warn!(
                    cooldown_secs = self.cooldown.as_secs(),
                    "rate limited during mapping lookup, pausing"
                );
                thread::sleep(self.cooldown);
                return Err(ResolveError::RateLimited);
            }
            Err(ClientError::Transport(msg)) => return Err(ResolveError::Transport(msg)),
        };

        self.cache.insert(query, mapped.clone());
        Ok(mapped)
    }

    fn lookup(&self, query: &str) -> ClientResult<Option<String>> {
        let prefixed = format!("Template:{query}");
        let mut page = if self.client.page_exists(&self.source, &prefixed)? {
            prefixed
        } else if self.client.page_exists(&self.source, query)?
            && self.client.namespace_of(&self.source, query)? == TEMPLATE_NAMESPACE
        {
            query.to_string()
        } else {
            debug!(name = %query, "no source page for mapping");
            return Ok(None);
        };

        // The graph links the redirect target, not the redirect itself.
        if self.client.is_redirect(&self.source, &page)? {
            match self.client.redirect_target(&self.source, &page)? {
                Some(target) if self.client.page_exists(&self.source, &target)? => page = target,
                _ => return Ok(None),
            }
        }

        let Some(linked) = self.graph.equivalent_page(&self.source, &page, &self.target)? else {
            debug!(page = %page, "no equivalence link");
            return Ok(None);
        };

        let normalized = normalize_name(&linked);
        if has_template_prefix(&normalized) {
            return Ok(Some(bare_template_name(&normalized)));
        }
        // Unqualified link: accept only if it independently classifies
        // as a template-namespace page on the target project.
        if self.client.namespace_of(&self.target, &normalized)? == TEMPLATE_NAMESPACE {
            Ok(Some(normalized))
        } else {
            warn!(linked = %normalized, "equivalent page is not a template, ignoring mapping");
            Ok(None)
        }
    }
}
