//! Session state as a value object
//!
//! Nothing here is persisted. The state is recomputed from the stored token
//! every time it is asked for, so a restart or a token written by another
//! process is always reflected.

use chrono::{DateTime, Utc};

use super::token::decode_claims;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No token, or an empty one
    Anonymous,

    /// A token is present but is not a readable JWT
    Undecodable,

    /// The token decodes but names no subject; it gets purged
    MissingSubject,

    /// Well-formed token past its expiry; left in storage until the next
    /// login overwrites it
    Expired {
        username: String,
        expired_at: DateTime<Utc>,
    },

    /// The only logged-in state
    Active {
        username: String,
        expires_at: Option<DateTime<Utc>>,
    },
}

impl SessionState {
    pub fn evaluate(token: Option<&str>, now: DateTime<Utc>) -> Self {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return SessionState::Anonymous;
        };

        let claims = match decode_claims(token) {
            Ok(claims) => claims,
            Err(e) => {
                log::debug!("[SessionState] Token did not decode: {}", e);
                return SessionState::Undecodable;
            }
        };

        let Some(username) = claims.subject() else {
            return SessionState::MissingSubject;
        };

        if claims.is_expired_at(now) {
            return SessionState::Expired {
                username: username.to_string(),
                expired_at: claims.expires_at().unwrap_or(now),
            };
        }

        SessionState::Active {
            username: username.to_string(),
            expires_at: claims.expires_at(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::Active { .. })
    }

    /// Username of an active session
    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Active { username, .. } => Some(username),
            _ => None,
        }
    }

    /// Whether the stored session must be wiped when this state is observed
    pub fn requires_purge(&self) -> bool {
        matches!(self, SessionState::MissingSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    use serde_json::json;

    fn mint(claims: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap()
    }

    #[test]
    fn absent_or_empty_token_is_anonymous() {
        let now = Utc::now();
        assert_eq!(SessionState::evaluate(None, now), SessionState::Anonymous);
        assert_eq!(
            SessionState::evaluate(Some(""), now),
            SessionState::Anonymous
        );
    }

    #[test]
    fn classifies_each_token_shape() {
        let now = Utc::now();
        let ts = now.timestamp();

        let active = mint(json!({ "sub": "ann", "exp": ts + 600 }));
        let state = SessionState::evaluate(Some(&active), now);
        assert!(state.is_logged_in());
        assert_eq!(state.username(), Some("ann"));

        let expired = mint(json!({ "sub": "ann", "exp": ts - 600 }));
        let state = SessionState::evaluate(Some(&expired), now);
        assert!(matches!(
            state,
            SessionState::Expired { ref username, .. } if username == "ann"
        ));
        assert!(!state.is_logged_in());
        assert!(!state.requires_purge());

        let anonymous = mint(json!({ "exp": ts + 600 }));
        let state = SessionState::evaluate(Some(&anonymous), now);
        assert_eq!(state, SessionState::MissingSubject);
        assert!(state.requires_purge());

        let state = SessionState::evaluate(Some("garbage"), now);
        assert_eq!(state, SessionState::Undecodable);
        assert!(!state.requires_purge());
    }

    #[test]
    fn fractional_expiry_reads_as_active() {
        let now = Utc::now();
        let exp = now.timestamp() as f64 + 3600.5;
        let token = mint(json!({ "sub": "ann", "exp": exp }));

        let state = SessionState::evaluate(Some(&token), now);
        assert!(state.is_logged_in());
        assert_eq!(state.username(), Some("ann"));
    }

    #[test]
    fn token_without_expiry_stays_active() {
        let token = mint(json!({ "sub": "ben" }));
        let state = SessionState::evaluate(Some(&token), Utc::now());
        assert_eq!(
            state,
            SessionState::Active {
                username: "ben".into(),
                expires_at: None
            }
        );
    }
}
