use wpb_types::Project;

use crate::error::{ClientResult, SaveError};

/// Namespace number of template pages, identical across projects.
pub const TEMPLATE_NAMESPACE: i32 = 10;

/// Read/write access to wiki pages.
///
/// The engine's concurrency model is blocking and sequential: every
/// call completes (or fails) before the next begins. Implementations
/// over a real transport own their session, retries below the rate
/// limit, and wire format; none of that is visible here.
pub trait WikiClient: Send + Sync {
    fn page_exists(&self, project: &Project, title: &str) -> ClientResult<bool>;

    fn is_redirect(&self, project: &Project, title: &str) -> ClientResult<bool>;

    /// Target of a redirect page, or `None` when the page is not a
    /// redirect. One hop only; the engine never follows chains.
    fn redirect_target(&self, project: &Project, title: &str) -> ClientResult<Option<String>>;

    fn fetch_text(&self, project: &Project, title: &str) -> ClientResult<String>;

    /// Namespace number the title belongs to, derived from its prefix.
    fn namespace_of(&self, project: &Project, title: &str) -> ClientResult<i32>;

    fn save(
        &self,
        project: &Project,
        title: &str,
        text: &str,
        summary: &str,
        bot: bool,
    ) -> Result<(), SaveError>;
}

/// Cross-project entity-equivalence lookup.
pub trait EquivalenceGraph: Send + Sync {
    /// The page in `target` equivalent to `title` in `project`, if the
    /// graph links one.
    fn equivalent_page(
        &self,
        project: &Project,
        title: &str,
        target: &Project,
    ) -> ClientResult<Option<String>>;
}
