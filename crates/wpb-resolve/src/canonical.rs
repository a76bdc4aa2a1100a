use tracing::{debug, warn};

use wpb_cache::PersistentCache;
use wpb_client::{ClientError, ClientResult, WikiClient, TEMPLATE_NAMESPACE};
use wpb_types::{normalize_name, Project};

use crate::error::ResolveResult;
use crate::bare_template_name;

/// Resolves a template name to its canonical (redirect-free) form
/// within one project.
///
/// Lookup order: cache, then the name under the template namespace,
/// then the bare name provided it classifies as a template page. A
/// redirect is followed for exactly one hop; the hop target must be an
/// existing, non-redirect template-namespace page, otherwise the name
/// resolves to absent. Canonical names are cached with a
/// self-referential entry so re-resolving a canonical name is free.
pub struct CanonicalResolver<'a> {
    client: &'a dyn WikiClient,
    cache: &'a PersistentCache,
    project: Project,
}

fn cache_key(project: &Project, name: &str) -> String {
    format!("{project}:{name}")
}

impl<'a> CanonicalResolver<'a> {
    pub fn new(client: &'a dyn WikiClient, cache: &'a PersistentCache, project: Project) -> Self {
        Self {
            client,
            cache,
            project,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Canonical name for `raw`, or `None` when the template does not
    /// exist (in this project) under any accepted form.
    pub fn resolve(&self, raw: &str) -> ResolveResult<Option<String>> {
        let clean = normalize_name(raw);
        if clean.is_empty() {
            return Ok(None);
        }
        let key = cache_key(&self.project, &clean);
        if let Some(cached) = self.cache.get(&key) {
            debug!(name = %clean, project = %self.project, "canonical cache hit");
            return Ok(cached);
        }

        let resolved = match self.lookup(&clean) {
            Ok(v) => v,
            Err(ClientError::InvalidTitle { title }) => {
                warn!(%title, "invalid title during canonical resolution, treating as absent");
                None
            }
            // Transient: propagate unresolved, cache nothing.
            Err(err) => return Err(err.into()),
        };

        self.cache.insert(key, resolved.clone());
        if let Some(canonical) = &resolved {
            if canonical != &clean {
                self.cache
                    .insert(cache_key(&self.project, canonical), Some(canonical.clone()));
            }
        }
        Ok(resolved)
    }

    fn lookup(&self, clean: &str) -> ClientResult<Option<String>> {
        let prefixed = format!("Template:{clean}");
        let page = if self.client.page_exists(&self.project, &prefixed)? {
            prefixed
        } else if self.client.page_exists(&self.project, clean)?
            && self.client.namespace_of(&self.project, clean)? == TEMPLATE_NAMESPACE
        {
            clean.to_string()
        } else {
            return Ok(None);
        };

        if !self.client.is_redirect(&self.project, &page)? {
            return Ok(Some(bare_template_name(&page)));
        }

        // Exactly one redirect hop.
        let Some(target) = self.client.redirect_target(&self.project, &page)? else {
            return Ok(None);
        };
        if self.client.namespace_of(&self.project, &target)? != TEMPLATE_NAMESPACE {
            warn!(from = %page, to = %target, "redirect leaves the template namespace");
            return Ok(None);
        }
        if !self.client.page_exists(&self.project, &target)?
            || self.client.is_redirect(&self.project, &target)?
        {
            // Missing target or a second hop: fail closed.
            return Ok(None);
        }
        Ok(Some(bare_template_name(&target)))
    }
}
