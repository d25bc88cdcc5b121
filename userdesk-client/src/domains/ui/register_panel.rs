use std::fmt;
use std::sync::Arc;

use log::info;
use userdesk_model::RegisterRequest;

use super::notifications::{NotificationType, Notifier, notify_failure};
use super::{Route, entry_route};
use crate::domains::auth::{AuthGateway, SessionManager};

pub const REGISTERED_MESSAGE: &str =
    "An email has been sent with your password.";

pub struct RegisterPanel {
    session: Arc<SessionManager>,
    auth: Arc<dyn AuthGateway>,
    notifier: Arc<dyn Notifier>,
    pub show_loading: bool,
}

impl fmt::Debug for RegisterPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPanel")
            .field("show_loading", &self.show_loading)
            .finish_non_exhaustive()
    }
}

impl RegisterPanel {
    pub fn new(
        session: Arc<SessionManager>,
        auth: Arc<dyn AuthGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            auth,
            notifier,
            show_loading: false,
        }
    }

    pub fn init(&self) -> Route {
        entry_route(&self.session, Route::Register)
    }

    /// Returns whether the account was created
    pub async fn on_register(&mut self, request: RegisterRequest) -> bool {
        self.show_loading = true;
        let result = self.auth.register(&request).await;
        self.show_loading = false;

        match result {
            Ok(user) => {
                info!("[RegisterPanel] Registered {}", user.username);
                self.notifier
                    .notify(NotificationType::Success, REGISTERED_MESSAGE);
                true
            }
            Err(e) => {
                notify_failure(self.notifier.as_ref(), &e);
                false
            }
        }
    }
}
