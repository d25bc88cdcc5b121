use std::fmt::Debug;
use std::sync::Arc;

use crate::infra::errors::StorageResult;

/// String key-value store with per-call atomicity.
///
/// `remove_items` must drop every listed key in a single operation so that a
/// reader never observes a partially cleared session.
pub trait KeyValueStore: Send + Sync + Debug {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_items(&self, keys: &[&str]) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_items(&self, keys: &[&str]) -> StorageResult<()> {
        (**self).remove_items(keys)
    }
}
