use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use parking_lot::RwLock;
use userdesk_model::User;

use super::state_types::SessionState;
use super::storage::TokenStore;
use crate::infra::errors::StorageResult;
use crate::infra::storage::KeyValueStore;

/// In-memory copy of what the last load/check saw
#[derive(Debug, Default)]
struct SessionCache {
    token: Option<String>,
    username: Option<String>,
}

/// Session manager
///
/// ## Token lifecycle
///
/// - `save_token` trusts the backend verbatim and overwrites any earlier token.
/// - Durable storage is the source of truth; the in-memory copy is refreshed by
///   `load_token` and by every session check.
/// - `log_out` wipes token, cached user and cached user list together.
///
/// ## Session checks
///
/// `session_state` decodes the stored token on every call:
/// - no token or an empty one: anonymous
/// - undecodable: not logged in, storage untouched
/// - decodes without a subject: not logged in and the session is purged
/// - expired: not logged in, storage untouched until the next login
/// - otherwise: active, and the username is remembered
#[derive(Debug)]
pub struct SessionManager {
    store: TokenStore,
    cache: RwLock<SessionCache>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store: TokenStore::new(store),
            cache: RwLock::new(SessionCache::default()),
        }
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    /// Persist a freshly issued token and make it current
    pub fn save_token(&self, token: &str) -> StorageResult<()> {
        self.store.save_token(token)?;
        self.cache.write().token = Some(token.to_string());
        debug!(
            "[SessionManager] Saved token ({}...)",
            token.chars().take(12).collect::<String>()
        );
        Ok(())
    }

    /// Refresh the in-memory token from durable storage
    pub fn load_token(&self) -> StorageResult<Option<String>> {
        let token = self.store.token()?;
        self.cache.write().token = token.clone();
        Ok(token)
    }

    /// The in-memory token as of the last save or load
    pub fn token(&self) -> Option<String> {
        self.cache.read().token.clone()
    }

    /// Username recorded by the last successful session check
    pub fn logged_in_username(&self) -> Option<String> {
        self.cache.read().username.clone()
    }

    /// Recompute the session from the stored token
    pub fn session_state(&self) -> StorageResult<SessionState> {
        let token = self.load_token()?;
        let state = SessionState::evaluate(token.as_deref(), Utc::now());

        if state.requires_purge() {
            warn!("[SessionManager] Stored token has no subject, clearing it");
            self.log_out()?;
        }

        match &state {
            SessionState::Active { username, .. } => {
                self.cache.write().username = Some(username.clone());
            }
            SessionState::Expired { expired_at, .. } => {
                debug!("[SessionManager] Stored token expired at {expired_at}");
            }
            _ => {}
        }

        Ok(state)
    }

    /// True only for an active session; every failure path reads as false
    pub fn is_user_logged_in(&self) -> bool {
        match self.session_state() {
            Ok(state) => state.is_logged_in(),
            Err(e) => {
                warn!("[SessionManager] Unable to read session: {}", e);
                false
            }
        }
    }

    /// Forget the session in storage, then in memory. Safe to call repeatedly.
    ///
    /// When storage cannot be cleared the in-memory copy is left as it was, so
    /// the manager never reports a logout that a restart would undo.
    pub fn log_out(&self) -> StorageResult<()> {
        self.store.clear_session()?;
        {
            let mut cache = self.cache.write();
            cache.token = None;
            cache.username = None;
        }
        info!("[SessionManager] Session cleared");
        Ok(())
    }

    pub fn add_user_to_local_cache(&self, user: &User) -> StorageResult<()> {
        self.store.save_user(user)
    }

    pub fn get_user_from_local_cache(&self) -> StorageResult<Option<User>> {
        self.store.user()
    }
}
