use thiserror::Error;

/// Errors from the wiki client and equivalence graph collaborators.
///
/// `InvalidTitle` is a permanent failure (the title can never resolve;
/// resolvers cache it as absent). `Transport` and `RateLimited` are
/// transient and must never be cached, so a later retry stays possible.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("invalid title: {title}")]
    InvalidTitle { title: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("rate limited by the remote")]
    RateLimited,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from the save collaborator. Locked pages and edit conflicts
/// are reported, not retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("page is locked")]
    Locked,

    #[error("edit conflict")]
    Conflict,

    #[error("rate limited by the remote")]
    RateLimited,

    #[error("save failed: {0}")]
    Other(String),
}
