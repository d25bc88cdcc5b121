//! Wiring from a [`ClientConfig`] to ready-to-use services and panels

use std::fmt;
use std::sync::Arc;

use log::info;

use crate::config::ClientConfig;
use crate::domains::auth::{AuthApiAdapter, AuthGateway, SessionManager};
use crate::domains::ui::{LoginPanel, Notifier, RegisterPanel, UserPanel};
use crate::domains::users::{UserDirectoryClient, UserDirectoryService};
use crate::infra::api_client::ApiClient;
use crate::infra::errors::ClientResult;
use crate::infra::storage::{FileStore, KeyValueStore};

#[derive(Clone)]
pub struct Services {
    pub session: Arc<SessionManager>,
    pub api: Arc<ApiClient>,
    pub auth: Arc<dyn AuthGateway>,
    pub directory: Arc<dyn UserDirectoryService>,
    pub notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("session", &self.session)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl Services {
    /// Build against the file store named by `config`
    pub fn from_config(
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let store = match &config.storage_path {
            Some(path) => FileStore::new(path),
            None => FileStore::in_default_location()?,
        };
        info!("[Bootstrap] Using local store at {}", store.path().display());
        Self::with_store(config, Arc::new(store), notifier)
    }

    pub fn with_store(
        config: &ClientConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let session = Arc::new(SessionManager::new(store));
        let api = Arc::new(ApiClient::new(
            &config.api_url,
            Arc::clone(&session),
            config.request_timeout(),
        )?);
        let auth = Arc::new(AuthApiAdapter::new(
            Arc::clone(&api),
            config.token_header.clone(),
        ));
        let directory = Arc::new(UserDirectoryClient::new(
            Arc::clone(&api),
            session.token_store().clone(),
        ));

        Ok(Self {
            session,
            api,
            auth,
            directory,
            notifier,
        })
    }

    pub fn login_panel(&self) -> LoginPanel {
        LoginPanel::new(
            Arc::clone(&self.session),
            Arc::clone(&self.auth),
            Arc::clone(&self.notifier),
        )
    }

    pub fn register_panel(&self) -> RegisterPanel {
        RegisterPanel::new(
            Arc::clone(&self.session),
            Arc::clone(&self.auth),
            Arc::clone(&self.notifier),
        )
    }

    pub fn user_panel(&self) -> UserPanel {
        UserPanel::new(
            Arc::clone(&self.session),
            Arc::clone(&self.directory),
            Arc::clone(&self.notifier),
        )
    }
}
