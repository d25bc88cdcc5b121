//! Token error types

use thiserror::Error;

/// Raised when a cached token cannot be read as a JWT.
///
/// Never surfaced to the user: the session manager folds it into
/// [`SessionState::Undecodable`](super::SessionState::Undecodable).
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token is empty")]
    Empty,

    #[error("Invalid token format: {0}")]
    InvalidFormat(#[from] jsonwebtoken::errors::Error),
}
