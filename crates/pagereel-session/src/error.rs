//! Session error types.

use thiserror::Error;

use pagereel_storage::StorageError;
use pagereel_supabase::SupabaseError;
use pagereel_upstream::UpstreamError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the generate session and profile loader.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The action needs a signed-in user; callers redirect to login.
    #[error("Authentication required")]
    AuthRequired,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(UpstreamError),

    #[error(transparent)]
    Store(#[from] SupabaseError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_auth_required(&self) -> bool {
        matches!(self, SessionError::AuthRequired)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Validation(_))
    }
}

/// Upstream validation folds into the session's own variant so callers
/// see one taxonomy.
impl From<UpstreamError> for SessionError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Validation(msg) => SessionError::Validation(msg),
            other => SessionError::Upstream(other),
        }
    }
}
