use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::infra::constants::DEFAULT_TOKEN_HEADER;

pub const APP_DIR: &str = "userdesk";
pub const CONFIG_FILE: &str = "config.json";

pub const API_URL_ENV: &str = "USERDESK_API_URL";
pub const STORAGE_PATH_ENV: &str = "USERDESK_STORAGE_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    /// Local store file; `None` means `<data_dir>/userdesk/local_storage.json`
    pub storage_path: Option<PathBuf>,
    pub token_header: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8081".to_string(),
            storage_path: None,
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Defaults, then the config file, then environment overrides
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read `path`; a missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<ClientConfig>(&content)
                    .map_err(|e| e.to_string())
            }) {
            Ok(config) => {
                debug!("[Config] Loaded {}", path.display());
                config
            }
            Err(e) => {
                warn!("[Config] Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        let lookup =
            |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(api_url) = lookup(API_URL_ENV) {
            self.api_url = api_url;
        }
        if let Some(path) = lookup(STORAGE_PATH_ENV) {
            self.storage_path = Some(PathBuf::from(path));
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"api_url": "http://api:9000"}"#).unwrap();

        let config = ClientConfig::load_from(&path);
        assert_eq!(config.api_url, "http://api:9000");
        assert_eq!(config.token_header, "Jwt-Token");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(ClientConfig::load_from(&path), ClientConfig::default());
        assert_eq!(
            ClientConfig::load_from(&dir.path().join("missing.json")),
            ClientConfig::default()
        );
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (API_URL_ENV, "https://users.example.com"),
            (STORAGE_PATH_ENV, "/tmp/userdesk.json"),
        ]);
        let mut config = ClientConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_url, "https://users.example.com");
        assert_eq!(
            config.storage_path,
            Some(PathBuf::from("/tmp/userdesk.json"))
        );
    }

    #[test]
    fn written_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = ClientConfig {
            request_timeout_secs: 5,
            storage_path: Some(dir.path().join("store.json")),
            ..ClientConfig::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap())
            .unwrap();
        assert_eq!(ClientConfig::load_from(&path), config);
    }
}
