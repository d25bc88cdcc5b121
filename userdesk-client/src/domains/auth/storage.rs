//! Typed access to the session entries of the local key-value store

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use userdesk_model::User;

use crate::infra::constants::storage_keys;
use crate::infra::errors::{StorageError, StorageResult};
use crate::infra::storage::KeyValueStore;

/// Façade over the `token`, `user` and `users` keys
#[derive(Debug, Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> StorageResult<Option<String>> {
        self.store.get_item(storage_keys::TOKEN)
    }

    pub fn save_token(&self, token: &str) -> StorageResult<()> {
        self.store.set_item(storage_keys::TOKEN, token)
    }

    pub fn user(&self) -> StorageResult<Option<User>> {
        self.read_json(storage_keys::USER)
    }

    pub fn save_user(&self, user: &User) -> StorageResult<()> {
        self.write_json(storage_keys::USER, user)
    }

    pub fn users(&self) -> StorageResult<Option<Vec<User>>> {
        self.read_json(storage_keys::USERS)
    }

    pub fn save_users(&self, users: &[User]) -> StorageResult<()> {
        self.write_json(storage_keys::USERS, users)
    }

    /// Drop token, user and user list in one store operation
    pub fn clear_session(&self) -> StorageResult<()> {
        self.store.remove_items(&storage_keys::SESSION_KEYS)
    }

    fn read_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> StorageResult<Option<T>> {
        match self.store.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(StorageError::CorruptedData),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| {
            StorageError::Serialization {
                key: key.to_string(),
                source,
            }
        })?;
        self.store.set_item(key, &raw)
    }
}
