use thiserror::Error;

use wpb_client::ClientError;

/// A lookup that could not complete. Unlike an absent result, an
/// unresolved lookup is never cached, so the same name can be retried
/// later.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("transport failure during lookup: {0}")]
    Transport(String),

    #[error("rate limited during lookup")]
    RateLimited,
}

impl From<ClientError> for ResolveError {
    fn from(err: ClientError) -> Self {
        match err {
            // Invalid titles are handled (as absent) before this
            // conversion; reaching here means a caller skipped that
            // step, which we still surface as a failed lookup.
            ClientError::InvalidTitle { title } => {
                Self::Transport(format!("invalid title: {title}"))
            }
            ClientError::Transport(msg) => Self::Transport(msg),
            ClientError::RateLimited => Self::RateLimited,
        }
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
