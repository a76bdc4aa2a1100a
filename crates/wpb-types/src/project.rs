use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one wiki project (language edition), e.g. `"en"` or
/// `"zh"`.
///
/// The code is opaque to the engine; it is only ever compared for
/// equality and used to qualify cache keys and client calls.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project(String);

impl Project {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Project {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
