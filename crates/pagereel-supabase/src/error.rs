//! Supabase error types.

use thiserror::Error;

/// Result type for Supabase operations.
pub type SupabaseResult<T> = Result<T, SupabaseError>;

/// Errors that can occur during Supabase operations.
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Server error ({0}): {1}")]
    ServerError(u16, String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SupabaseError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map a PostgREST error status onto the taxonomy.
    pub fn from_http_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => SupabaseError::PermissionDenied(message),
            404 => SupabaseError::NotFound(message),
            409 => SupabaseError::Conflict(message),
            400..=499 => SupabaseError::RequestFailed(message),
            _ => SupabaseError::ServerError(status, message),
        }
    }

    /// HTTP status this error corresponds to, when one applies.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            SupabaseError::PermissionDenied(_) => Some(403),
            SupabaseError::NotFound(_) => Some(404),
            SupabaseError::Conflict(_) => Some(409),
            SupabaseError::RequestFailed(_) => Some(400),
            SupabaseError::Timeout(_) => Some(408),
            SupabaseError::ServerError(status, _) => Some(*status),
            _ => None,
        }
    }

    /// True when the remote call timed out rather than failed outright.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SupabaseError::Timeout(_))
    }
}
