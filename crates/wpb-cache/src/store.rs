use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{info, warn};

use crate::error::CacheResult;

/// A persistent lookup cache: flat `key → resolved-or-absent` mapping.
///
/// Three states per key matter to the resolvers:
/// - not present: never looked up (or the last lookup failed
///   transiently and was deliberately not recorded)
/// - `Some(None)`: looked up, known absent — cacheable indefinitely
/// - `Some(Some(value))`: looked up, resolved
///
/// Transient lookup failures must never be inserted, so retries remain
/// possible on a later run.
///
/// Persisted as a JSON object with string-or-null values. Loaded once
/// at startup, flushed periodically and at shutdown by the batch
/// runner. Interior mutability keeps a single shared instance usable
/// from the resolvers; a concurrent caller only ever risks a duplicate
/// lookup, never corruption.
pub struct PersistentCache {
    path: Option<PathBuf>,
    entries: RwLock<HashMap<String, Option<String>>>,
}

impl PersistentCache {
    /// A cache with no backing file; `save` is a no-op.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Load a cache from `path`. A missing file starts empty; a corrupt
    /// file is logged and also starts empty rather than aborting the
    /// run.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, Option<String>>>(&raw) {
                Ok(map) => {
                    info!(path = %path.display(), entries = map.len(), "loaded cache");
                    map
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "corrupt cache file, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no cache file yet, starting empty");
                HashMap::new()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable cache file, starting empty");
                HashMap::new()
            }
        };
        Self {
            path: Some(path),
            entries: RwLock::new(entries),
        }
    }

    /// The cached state of `key`: `None` if never looked up, otherwise
    /// the recorded resolved-or-absent value.
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        self.entries
            .read()
            .expect("lock poisoned")
            .get(key)
            .cloned()
    }

    /// Record a lookup result, positive (`Some`) or known-absent
    /// (`None`).
    pub fn insert(&self, key: impl Into<String>, value: Option<String>) {
        self.entries
            .write()
            .expect("lock poisoned")
            .insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Flush to the backing file, if any.
    pub fn save(&self) -> CacheResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let entries = self.entries.read().expect("lock poisoned");
        let raw = serde_json::to_string_pretty(&*entries)?;
        fs::write(path, raw)?;
        info!(path = %path.display(), entries = entries.len(), "saved cache");
        Ok(())
    }
}

impl std::fmt::Debug for PersistentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentCache")
            .field("path", &self.path)
            .field("entries", &self.len())
            .finish()
    }
}
