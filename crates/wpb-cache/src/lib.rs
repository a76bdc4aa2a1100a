//! Persistent name-resolution caches.
//!
//! Both resolver caches (canonical names within a project, cross-
//! project template mappings) share one representation: a flat
//! string-keyed mapping to string-or-null, serialized as JSON. See
//! [`PersistentCache`] for the caching discipline, in particular why
//! transient failures are never recorded.

pub mod error;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use store::PersistentCache;
