use std::fmt;
use std::sync::Arc;

use log::info;
use userdesk_model::LoginRequest;

use super::notifications::{Notifier, notify_failure};
use super::{Route, entry_route};
use crate::domains::auth::{AuthGateway, LoginOutcome, SessionManager};
use crate::infra::errors::ClientResult;

pub struct LoginPanel {
    session: Arc<SessionManager>,
    auth: Arc<dyn AuthGateway>,
    notifier: Arc<dyn Notifier>,
    pub show_loading: bool,
}

impl fmt::Debug for LoginPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPanel")
            .field("show_loading", &self.show_loading)
            .finish_non_exhaustive()
    }
}

impl LoginPanel {
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
        entry_route(&self.session, Route::Login)
    }

    /// Log in, persist the token and user, and move to user management.
    ///
    /// Returns `None` when the attempt failed; the failure has already been
    /// notified.
    pub async fn on_login(&mut self, request: LoginRequest) -> Option<Route> {
        self.show_loading = true;
        let result = self.auth.login(&request).await;
        let result = result.and_then(|outcome| self.persist(outcome));
        self.show_loading = false;

        match result {
            Ok(()) => {
                info!("[LoginPanel] Logged in as {}", request.username);
                Some(Route::UserManagement)
            }
            Err(e) => {
                notify_failure(self.notifier.as_ref(), &e);
                None
            }
        }
    }

    fn persist(&self, outcome: LoginOutcome) -> ClientResult<()> {
        self.session.save_token(&outcome.token)?;
        self.session.add_user_to_local_cache(&outcome.user)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use userdesk_model::User;

    use super::*;
    use crate::domains::auth::service::MockAuthGateway;
    use crate::domains::ui::NotificationType;
    use crate::domains::ui::notifications::testing::RecordingNotifier;
    use crate::infra::errors::ClientError;
    use crate::infra::storage::MemoryStore;

    type Fixture = (LoginPanel, Arc<SessionManager>, Arc<RecordingNotifier>);

    fn panel(auth: MockAuthGateway) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let session = Arc::new(SessionManager::new(store));
        let notifier = Arc::new(RecordingNotifier::default());
        let panel =
            LoginPanel::new(session.clone(), Arc::new(auth), notifier.clone());
        (panel, session, notifier)
    }

    fn request() -> LoginRequest {
        LoginRequest {
            username: "ann".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn successful_login_saves_token_and_user() {
        let mut auth = MockAuthGateway::new();
        auth.expect_login().times(1).returning(|_| {
            Ok(LoginOutcome {
                token: "abc.def.ghi".into(),
                user: User {
                    username: "ann".into(),
                    ..User::default()
                },
            })
        });
        let (mut panel, session, notifier) = panel(auth);

        let route = panel.on_login(request()).await;

        assert_eq!(route, Some(Route::UserManagement));
        assert!(!panel.show_loading);
        assert_eq!(session.token().as_deref(), Some("abc.def.ghi"));
        assert_eq!(
            session.get_user_from_local_cache().unwrap().unwrap().username,
            "ann"
        );
        assert!(notifier.seen().is_empty());
    }

    #[tokio::test]
    async fn rejected_login_notifies_and_clears_loading() {
        let mut auth = MockAuthGateway::new();
        auth.expect_login().returning(|_| {
            Err(ClientError::Api {
                status: StatusCode::BAD_REQUEST,
                message: Some("Username / password incorrect".into()),
            })
        });
        let (mut panel, session, notifier) = panel(auth);

        assert_eq!(panel.on_login(request()).await, None);
        assert!(!panel.show_loading);
        assert_eq!(session.token(), None);
        assert_eq!(
            notifier.last(),
            Some((
                NotificationType::Error,
                "Username / password incorrect".into()
            ))
        );
    }

    #[test]
    fn anonymous_visitor_stays_on_login() {
        let (panel, _, _) = panel(MockAuthGateway::new());
        assert_eq!(panel.init(), Route::Login);
    }
}
