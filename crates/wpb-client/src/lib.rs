//! External collaborator interfaces for the banner sync engine.
//!
//! The reconciliation engine only ever talks to the outside world
//! through two traits: [`WikiClient`] (page reads, redirect inspection,
//! saves) and [`EquivalenceGraph`] (cross-project page equivalence).
//! Real transports live behind these traits and are out of scope here;
//! [`InMemoryWiki`] implements both for tests and for the offline
//! fixture driver.
//!
//! # Error discipline
//!
//! - [`ClientError::InvalidTitle`] is permanent and may be cached as an
//!   absent result by resolvers.
//! - [`ClientError::Transport`] and [`ClientError::RateLimited`] are
//!   transient: resolvers must propagate them without caching so a
//!   later retry can succeed.

pub mod error;
pub mod fixture;
pub mod memory;
pub mod traits;

pub use error::{ClientError, ClientResult, SaveError};
pub use fixture::{FixtureLink, FixturePage, WikiFixture};
pub use memory::{InMemoryWiki, SavedEdit};
pub use traits::{EquivalenceGraph, WikiClient, TEMPLATE_NAMESPACE};
