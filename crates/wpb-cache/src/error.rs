use thiserror::Error;

/// Errors produced when flushing a cache to disk. Load never fails: a
/// missing or corrupt file yields an empty cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;
