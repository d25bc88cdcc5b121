//! Headless screen controllers
//!
//! Each panel holds the flags a view would bind to and reports outcomes
//! through a [`Notifier`]. Navigation is returned as a [`Route`].

pub mod login_panel;
pub mod notifications;
pub mod register_panel;
pub mod user_panel;

pub use login_panel::LoginPanel;
pub use notifications::{
    LogNotifier, NotificationType, Notifier, send_notification,
};
pub use register_panel::RegisterPanel;
pub use user_panel::UserPanel;

use crate::domains::auth::SessionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    UserManagement,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::UserManagement => "/user/management",
        }
    }
}

/// Anonymous screens bounce an active session to user management
pub(crate) fn entry_route(session: &SessionManager, anonymous: Route) -> Route {
    if session.is_user_logged_in() {
        Route::UserManagement
    } else {
        anonymous
    }
}
