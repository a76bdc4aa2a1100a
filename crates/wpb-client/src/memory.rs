use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use wpb_types::{normalize_name, Project};

use crate::error::{ClientError, ClientResult, SaveError};
use crate::traits::{EquivalenceGraph, WikiClient};

/// Characters that make a title invalid on every project.
const FORBIDDEN_TITLE_CHARS: &[char] = &['<', '>', '[', ']', '{', '}', '|', '#'];

#[derive(Clone, Debug)]
struct PageRecord {
    text: String,
    redirect_to: Option<String>,
}

#[derive(Clone, Copy, Debug)]
enum Fault {
    Transport,
    RateLimited,
}

/// One recorded call to [`WikiClient::save`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedEdit {
    pub project: Project,
    pub title: String,
    pub text: String,
    pub summary: String,
    pub bot: bool,
}

/// In-memory wiki implementing both collaborator traits.
///
/// Intended for tests and the offline fixture driver. Pages, redirects,
/// and equivalence links are registered up front; saves are recorded
/// and applied, so a second run over the same wiki observes the first
/// run's edits. Transport faults and rate limits can be injected per
/// title.
pub struct InMemoryWiki {
    pages: RwLock<HashMap<(String, String), PageRecord>>,
    links: RwLock<HashMap<(String, String), HashMap<String, String>>>,
    faults: RwLock<HashMap<(String, String), Fault>>,
    locked: RwLock<HashSet<(String, String)>>,
    saves: RwLock<Vec<SavedEdit>>,
}

fn key(project: &Project, title: &str) -> (String, String) {
    (project.code().to_string(), normalize_name(title))
}

/// Namespace number from the title prefix. Only the namespaces the sync
/// engine distinguishes are mapped; everything else is the main
/// namespace.
fn title_namespace(title: &str) -> i32 {
    let Some((prefix, _)) = title.split_once(':') else {
        return 0;
    };
    match normalize_name(prefix).to_lowercase().as_str() {
        "talk" => 1,
        "template" => 10,
        "template talk" => 11,
        _ => 0,
    }
}

fn validate_title(title: &str) -> ClientResult<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() || trimmed.contains(FORBIDDEN_TITLE_CHARS) {
        return Err(ClientError::InvalidTitle {
            title: title.to_string(),
        });
    }
    Ok(())
}

impl InMemoryWiki {
    pub fn new() -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            links: RwLock::new(HashMap::new()),
            faults: RwLock::new(HashMap::new()),
            locked: RwLock::new(HashSet::new()),
            saves: RwLock::new(Vec::new()),
        }
    }

    pub fn add_page(&self, project: &Project, title: &str, text: &str) {
        self.pages.write().expect("lock poisoned").insert(
            key(project, title),
            PageRecord {
                text: text.to_string(),
                redirect_to: None,
            },
        );
    }

    pub fn add_redirect(&self, project: &Project, title: &str, target: &str) {
        self.pages.write().expect("lock poisoned").insert(
            key(project, title),
            PageRecord {
                text: format!("#REDIRECT [[{target}]]"),
                redirect_to: Some(target.to_string()),
            },
        );
    }

    /// Register an equivalence link between two pages, in both
    /// directions.
    pub fn link(&self, a_project: &Project, a_title: &str, b_project: &Project, b_title: &str) {
        let mut links = self.links.write().expect("lock poisoned");
        links
            .entry(key(a_project, a_title))
            .or_default()
            .insert(b_project.code().to_string(), b_title.to_string());
        links
            .entry(key(b_project, b_title))
            .or_default()
            .insert(a_project.code().to_string(), a_title.to_string());
    }

    /// Every client call touching this title fails with a transport
    /// error until the fault is cleared.
    pub fn fail_transport(&self, project: &Project, title: &str) {
        self.faults
            .write()
            .expect("lock poisoned")
            .insert(key(project, title), Fault::Transport);
    }

    /// Every client call touching this title reports a rate limit.
    pub fn rate_limit(&self, project: &Project, title: &str) {
        self.faults
            .write()
            .expect("lock poisoned")
            .insert(key(project, title), Fault::RateLimited);
    }

    pub fn clear_faults(&self) {
        self.faults.write().expect("lock poisoned").clear();
    }

    /// Saves to this title fail with [`SaveError::Locked`].
    pub fn lock_page(&self, project: &Project, title: &str) {
        self.locked
            .write()
            .expect("lock poisoned")
            .insert(key(project, title));
    }

    pub fn page_text(&self, project: &Project, title: &str) -> Option<String> {
        self.pages
            .read()
            .expect("lock poisoned")
            .get(&key(project, title))
            .map(|r| r.text.clone())
    }

    pub fn saved_edits(&self) -> Vec<SavedEdit> {
        self.saves.read().expect("lock poisoned").clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.read().expect("lock poisoned").len()
    }

    fn check_fault(&self, project: &Project, title: &str) -> ClientResult<()> {
        match self
            .faults
            .read()
            .expect("lock poisoned")
            .get(&key(project, title))
        {
            Some(Fault::Transport) => Err(ClientError::Transport(format!(
                "injected fault for {project}:{title}"
            ))),
            Some(Fault::RateLimited) => Err(ClientError::RateLimited),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryWiki {
    fn default() -> Self {
        Self::new()
    }
}

impl WikiClient for InMemoryWiki {
    fn page_exists(&self, project: &Project, title: &str) -> ClientResult<bool> {
        validate_title(title)?;
        self.check_fault(project, title)?;
        Ok(self
            .pages
            .read()
            .expect("lock poisoned")
            .contains_key(&key(project, title)))
    }

    fn is_redirect(&self, project: &Project, title: &str) -> ClientResult<bool> {
        validate_title(title)?;
        self.check_fault(project, title)?;
        Ok(self
            .pages
            .read()
            .expect("lock poisoned")
            .get(&key(project, title))
            .is_some_and(|r| r.redirect_to.is_some()))
    }

    fn redirect_target(&self, project: &Project, title: &str) -> ClientResult<Option<String>> {
        validate_title(title)?;
        self.check_fault(project, title)?;
        Ok(self
            .pages
            .read()
            .expect("lock poisoned")
            .get(&key(project, title))
            .and_then(|r| r.redirect_to.clone()))
    }

    fn fetch_text(&self, project: &Project, title: &str) -> ClientResult<String> {
        validate_title(title)?;
        self.check_fault(project, title)?;
        self.pages
            .read()
            .expect("lock poisoned")
            .get(&key(project, title))
            .map(|r| r.text.clone())
            .ok_or_else(|| ClientError::Transport(format!("no such page {project}:{title}")))
    }

    fn namespace_of(&self, _project: &Project, title: &str) -> ClientResult<i32> {
        validate_title(title)?;
        Ok(title_namespace(title))
    }

    fn save(
        &self,
        project: &Project,
        title: &str,
        text: &str,
        summary: &str,
        bot: bool,
    ) -> Result<(), SaveError> {
        let k = key(project, title);
        match self.faults.read().expect("lock poisoned").get(&k) {
            Some(Fault::Transport) => {
                return Err(SaveError::Other(format!("injected fault for {project}:{title}")))
            }
            Some(Fault::RateLimited) => return Err(SaveError::RateLimited),
            None => {}
        }
        if self.locked.read().expect("lock poisoned").contains(&k) {
            return Err(SaveError::Locked);
        }
        self.pages.write().expect("lock poisoned").insert(
            k,
            PageRecord {
                text: text.to_string(),
                redirect_to: None,
            },
        );
        self.saves.write().expect("lock poisoned").push(SavedEdit {
            project: project.clone(),
            title: title.to_string(),
            text: text.to_string(),
            summary: summary.to_string(),
            bot,
        });
        Ok(())
    }
}

impl EquivalenceGraph for InMemoryWiki {
    fn equivalent_page(
        &self,
        project: &Project,
        title: &str,
        target: &Project,
    ) -> ClientResult<Option<String>> {
        validate_title(title)?;
        self.check_fault(project, title)?;
        Ok(self
            .links
            .read()
            .expect("lock poisoned")
            .get(&key(project, title))
            .and_then(|by_project| by_project.get(target.code()).cloned()))
    }
}

impl std::fmt::Debug for InMemoryWiki {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWiki")
            .field("pages", &self.pages.read().expect("lock poisoned").len())
            .field("saves", &self.save_count())
            .finish()
    }
}
