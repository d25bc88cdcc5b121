//! Error types for storage and HTTP operations
//!
//! Backend failures keep the server's `message` field so the UI layer can show
//! it verbatim.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the local key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read local storage")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write local storage")]
    WriteFailed(#[source] std::io::Error),

    #[error("Corrupted local storage data: {0}")]
    CorruptedData(#[source] serde_json::Error),

    #[error("Failed to serialize value for key '{key}'")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to determine a data directory for local storage")]
    NoDataDir,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by backend calls
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, the request never produced a response
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error(
        "Request failed with status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Login succeeded but the token header was absent
    #[error("Response is missing the '{0}' header")]
    MissingTokenHeader(String),

    /// Cached token contains bytes that cannot appear in a header
    #[error("Stored token cannot be used as a header value")]
    InvalidTokenHeader(#[source] reqwest::header::InvalidHeaderValue),

    #[error("Invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The backend's human-readable message, when one was returned.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(err) => err.status(),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_ignores_blank_messages() {
        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: Some("   ".into()),
        };
        assert_eq!(err.server_message(), None);

        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: Some("Username already exists".into()),
        };
        assert_eq!(err.server_message(), Some("Username already exists"));
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn non_api_errors_have_no_server_message() {
        let err = ClientError::MissingTokenHeader("Jwt-Token".into());
        assert_eq!(err.server_message(), None);
        assert_eq!(err.status(), None);
    }
}
