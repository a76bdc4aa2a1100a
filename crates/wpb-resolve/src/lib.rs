//! Template name resolution.
//!
//! Two resolvers, both memoized through [`wpb_cache::PersistentCache`]:
//!
//! - [`CanonicalResolver`] answers "what is the redirect-free,
//!   namespace-verified identity of this template within one project?"
//! - [`MappingResolver`] answers "which template on the target project
//!   is equivalent to this source template name?" via the equivalence
//!   graph. Its result is a raw target name; canonicalizing it is the
//!   caller's separate, project-local step.
//!
//! Both fail closed: missing pages, invalid titles, off-namespace
//! redirect targets, and chains longer than one hop all resolve to
//! absent (and the absence is cached — redirects rarely change).
//! Transient transport failures are the exception: they surface as
//! [`ResolveError`] and are never cached, so retries remain possible.

pub mod canonical;
pub mod error;
pub mod mapping;

pub use canonical::CanonicalResolver;
pub use error::{ResolveError, ResolveResult};
pub use mapping::MappingResolver;

/// `true` if the normalized name starts with a `Template:` prefix,
/// case-insensitively.
pub(crate) fn has_template_prefix(name: &str) -> bool {
    name.get(..9)
        .is_some_and(|p| p.eq_ignore_ascii_case("template:"))
}

/// Normalize a title and strip a leading `Template:` prefix if present.
pub(crate) fn bare_template_name(title: &str) -> String {
    let normalized = wpb_types::normalize_name(title);
    if has_template_prefix(&normalized) {
        wpb_types::normalize_name(&normalized[9..])
    } else {
        normalized
    }
}
