//! User management screen
//!
//! Every request clears `refreshing` and any staged profile image once it
//! settles, whether it succeeded or not.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use log::{debug, warn};
use userdesk_model::{ServerMessage, User, UserRole};

use super::Route;
use super::notifications::{
    NotificationType, Notifier, notify_failure, send_notification,
};
use crate::domains::auth::SessionManager;
use crate::domains::users::{
    FileUploadStatus, ProfileImage, UploadEvent, UserDirectoryService,
    create_user_form_data, search_users,
};
use crate::infra::errors::{ClientError, ClientResult};

pub const LOGGED_OUT_MESSAGE: &str = "You've been successfully logged out";
pub const UPLOAD_FAILED_MESSAGE: &str =
    "Unable to upload image. Please try again.";

pub struct UserPanel {
    session: Arc<SessionManager>,
    directory: Arc<dyn UserDirectoryService>,
    notifier: Arc<dyn Notifier>,
    /// The logged-in user
    pub user: Option<User>,
    pub users: Vec<User>,
    pub refreshing: bool,
    pub selected_user: Option<User>,
    pub edit_user: User,
    current_username: Option<String>,
    pub file_name: Option<String>,
    profile_image: Option<ProfileImage>,
    pub file_status: FileUploadStatus,
}

impl fmt::Debug for UserPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPanel")
            .field("user", &self.user.as_ref().map(|u| &u.username))
            .field("users", &self.users.len())
            .field("refreshing", &self.refreshing)
            .field("file_name", &self.file_name)
            .field("file_status", &self.file_status)
            .finish_non_exhaustive()
    }
}

impl UserPanel {
    pub fn new(
        session: Arc<SessionManager>,
        directory: Arc<dyn UserDirectoryService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            directory,
            notifier,
            user: None,
            users: Vec::new(),
            refreshing: false,
            selected_user: None,
            edit_user: User::default(),
            current_username: None,
            file_name: None,
            profile_image: None,
            file_status: FileUploadStatus::default(),
        }
    }

    /// Load the logged-in user from the cache, then fetch the list.
    pub async fn init(&mut self) {
        self.user = self.cached_user();
        self.get_users(true).await;
    }

    fn role(&self) -> Option<UserRole> {
        self.user.as_ref().and_then(User::role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|role| role.is_admin())
    }

    pub fn is_manager(&self) -> bool {
        self.role().is_some_and(|role| role.is_manager())
    }

    pub fn is_admin_or_manager(&self) -> bool {
        self.role().is_some_and(|role| role.is_admin_or_manager())
    }

    pub fn on_select_user(&mut self, user: User) {
        self.selected_user = Some(user);
    }

    pub fn on_edit_user(&mut self, user: User) {
        self.current_username = Some(user.username.clone());
        self.edit_user = user;
    }

    pub fn on_profile_image_change(&mut self, image: ProfileImage) {
        self.file_name = Some(image.file_name.clone());
        self.profile_image = Some(image);
    }

    pub fn staged_profile_image(&self) -> Option<&ProfileImage> {
        self.profile_image.as_ref()
    }

    pub async fn get_users(&mut self, show_notification: bool) {
        self.refreshing = true;
        let result = self.directory.get_users().await;
        self.refreshing = false;

        match result {
            Ok(users) => {
                if let Err(e) =
                    self.directory.add_users_to_local_cache(&users)
                {
                    warn!("[UserPanel] Unable to cache user list: {}", e);
                }
                if show_notification {
                    self.notify_success(&format!(
                        "{} Users loaded successfully.",
                        users.len()
                    ));
                }
                self.users = users;
            }
            Err(e) => notify_failure(self.notifier.as_ref(), &e),
        }
    }

    pub fn search_users(&mut self, term: &str) {
        let cached = match self.directory.get_users_from_local_cache() {
            Ok(cached) => cached.unwrap_or_default(),
            Err(e) => {
                warn!("[UserPanel] Unable to read cached users: {}", e);
                Vec::new()
            }
        };
        self.users = search_users(&cached, term);
    }

    pub async fn on_add_new_user(&mut self, user: User) -> bool {
        let image = self.take_staged_image();
        let form = create_user_form_data(None, &user, image);
        let result = self.directory.add_user(form).await;
        self.saved_user(result, "added").await.is_some()
    }

    /// Save `edit_user` under the username it was selected with.
    pub async fn on_update_user(&mut self) -> bool {
        let image = self.take_staged_image();
        let form = create_user_form_data(
            self.current_username.as_deref(),
            &self.edit_user,
            image,
        );
        let result = self.directory.update_user(form).await;
        self.saved_user(result, "updated").await.is_some()
    }

    /// Save the logged-in user's own profile and refresh the cached copy.
    pub async fn on_update_current_user(&mut self, user: User) -> bool {
        self.refreshing = true;
        self.current_username = self
            .cached_user()
            .or_else(|| self.user.clone())
            .map(|cached| cached.username);

        let image = self.take_staged_image();
        let form = create_user_form_data(
            self.current_username.as_deref(),
            &user,
            image,
        );
        let result = self.directory.update_user(form).await;
        self.refreshing = false;

        match self.saved_user(result, "updated").await {
            Some(updated) => {
                if let Err(e) =
                    self.session.add_user_to_local_cache(&updated)
                {
                    warn!("[UserPanel] Unable to cache current user: {}", e);
                }
                self.user = Some(updated);
                true
            }
            None => false,
        }
    }

    pub async fn on_delete_user(&mut self, username: &str) -> bool {
        let result = self.directory.delete_user(username).await;
        let deleted = self.server_reply(result);
        if deleted {
            self.get_users(false).await;
        }
        deleted
    }

    pub async fn on_reset_password(&mut self, email: &str) -> bool {
        self.refreshing = true;
        let result = self.directory.reset_password(email).await;
        self.refreshing = false;
        self.server_reply(result)
    }

    /// Upload the staged image for the logged-in user, feeding `file_status`.
    pub async fn on_update_profile_image(&mut self) -> bool {
        let image = self.take_staged_image();
        let (Some(username), Some(image)) =
            (self.user.as_ref().map(|u| u.username.clone()), image)
        else {
            send_notification(
                self.notifier.as_ref(),
                NotificationType::Warning,
                Some(UPLOAD_FAILED_MESSAGE),
            );
            return false;
        };

        self.file_status.reset();
        let mut events =
            self.directory.update_profile_image(&username, image);
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => self.report_upload_progress(event),
                Err(e) => {
                    warn!("[UserPanel] Profile image upload failed: {}", e);
                    let message =
                        e.server_message().unwrap_or(UPLOAD_FAILED_MESSAGE);
                    send_notification(
                        self.notifier.as_ref(),
                        NotificationType::Error,
                        Some(message),
                    );
                    return false;
                }
            }
        }
        true
    }

    pub fn report_upload_progress(&mut self, event: UploadEvent) {
        self.file_status.record(&event);
        if let UploadEvent::UploadProgress { loaded, total } = &event {
            debug!("[UserPanel] Uploaded {}/{} bytes", loaded, total);
        }

        if let UploadEvent::Response(updated) = event {
            let busted = format!(
                "{}?time={}",
                updated.profile_image_url,
                Utc::now().timestamp_millis()
            );
            if let Some(user) = self.user.as_mut() {
                user.profile_image_url = busted;
            }
            self.notify_success(&format!(
                "{}'s image updated successfully.",
                updated.first_name
            ));
        }
    }

    /// Clear the session and route to login.
    ///
    /// Returns `None` when the stored session could not be removed; the panel
    /// keeps its state and the failure is notified.
    pub fn on_log_out(&mut self) -> Option<Route> {
        if let Err(e) = self.session.log_out() {
            notify_failure(self.notifier.as_ref(), &ClientError::from(e));
            return None;
        }
        self.user = None;
        self.users.clear();
        self.selected_user = None;
        self.notify_success(LOGGED_OUT_MESSAGE);
        Some(Route::Login)
    }

    async fn saved_user(
        &mut self,
        result: ClientResult<User>,
        verb: &str,
    ) -> Option<User> {
        match result {
            Ok(saved) => {
                self.get_users(false).await;
                self.notify_success(&format!(
                    "{} {} {} successfully.",
                    saved.first_name, saved.last_name, verb
                ));
                Some(saved)
            }
            Err(e) => {
                notify_failure(self.notifier.as_ref(), &e);
                None
            }
        }
    }

    fn server_reply(&self, result: ClientResult<ServerMessage>) -> bool {
        match result {
            Ok(reply) => {
                send_notification(
                    self.notifier.as_ref(),
                    NotificationType::Success,
                    reply.text(),
                );
                true
            }
            Err(e) => {
                notify_failure(self.notifier.as_ref(), &e);
                false
            }
        }
    }

    fn take_staged_image(&mut self) -> Option<ProfileImage> {
        self.file_name = None;
        self.profile_image.take()
    }

    fn cached_user(&self) -> Option<User> {
        self.session.get_user_from_local_cache().unwrap_or_else(|e| {
            warn!("[UserPanel] Unable to read cached user: {}", e);
            None
        })
    }

    fn notify_success(&self, message: &str) {
        self.notifier.notify(NotificationType::Success, message);
    }
}
