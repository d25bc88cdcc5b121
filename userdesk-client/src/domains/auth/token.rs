use chrono::{DateTime, Utc};
use jsonwebtoken::dangerous::insecure_decode;
use serde::Deserialize;

use super::errors::TokenError;

/// Claims this client cares about. Unknown claims are ignored.
///
/// `exp` and `iat` are NumericDate values, which may carry a fraction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Subject, the username
    pub sub: Option<String>,
    /// Expiration time (seconds since the epoch)
    pub exp: Option<f64>,
    /// Issued at (seconds since the epoch)
    pub iat: Option<f64>,
    pub iss: Option<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl TokenClaims {
    /// The subject, treating a blank one as absent.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|sub| !sub.trim().is_empty())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
            .and_then(|exp| DateTime::from_timestamp_millis(to_millis(exp)))
    }

    /// A token without `exp` never expires; otherwise it is expired once
    /// `exp` is at or before `now`, compared in milliseconds.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp
            .is_some_and(|exp| exp * 1000.0 <= now.timestamp_millis() as f64)
    }
}

fn to_millis(seconds: f64) -> i64 {
    (seconds * 1000.0).floor() as i64
}

/// Read the claims of a JWT without checking its signature.
///
/// The client never holds the signing key; the backend re-validates the token
/// on every request, so this is only used to decide what to show locally.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    if token.trim().is_empty() {
        return Err(TokenError::Empty);
    }

    Ok(insecure_decode::<TokenClaims>(token)?.claims)
}
