use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use super::traits::KeyValueStore;
use crate::infra::errors::{StorageError, StorageResult};

pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

/// JSON-file backed store.
///
/// The whole map lives in one file that is re-read on every access, so the
/// file stays the source of truth across processes. Writes go to a temp file
/// in the same directory which is then renamed over the original.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store under the platform data directory, e.g.
    /// `~/.local/share/userdesk/local_storage.json`.
    pub fn in_default_location() -> StorageResult<Self> {
        let dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dir.join("userdesk").join(LOCAL_STORAGE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> StorageResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                warn!(
                    "[FileStore] {} is not a valid storage file: {}",
                    self.path.display(),
                    e
                );
                StorageError::CorruptedData(e)
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::ReadFailed(e)),
        }
    }

    /// Map to start a write from. A corrupt file cannot be merged into, so
    /// writers start over from an empty map; the flag says it must be
    /// rewritten even when nothing else changes.
    fn read_map_for_write(
        &self,
    ) -> StorageResult<(BTreeMap<String, String>, bool)> {
        match self.read_map() {
            Ok(map) => Ok((map, false)),
            Err(StorageError::CorruptedData(_)) => {
                warn!(
                    "[FileStore] Discarding unreadable contents of {}",
                    self.path.display()
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> StorageResult<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(StorageError::WriteFailed)?;

        let content = serde_json::to_string_pretty(map).map_err(|source| {
            StorageError::Serialization {
                key: "*".to_string(),
                source,
            }
        })?;

        let mut tmp =
            NamedTempFile::new_in(parent).map_err(StorageError::WriteFailed)?;
        tmp.write_all(content.as_bytes())
            .map_err(StorageError::WriteFailed)?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::WriteFailed(e.error))?;
        debug!(
            "[FileStore] Wrote {} entries to {}",
            map.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock();
        let (mut map, _) = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove_items(&self, keys: &[&str]) -> StorageResult<()> {
        let _guard = self.write_lock.lock();
        let (mut map, corrupt) = self.read_map_for_write()?;
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() == before && !corrupt {
            return Ok(());
        }
        self.write_map(&map)
    }
}
