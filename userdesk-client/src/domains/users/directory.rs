use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use userdesk_model::{ServerMessage, User};

use super::form::{ProfileImage, UserForm};
use super::upload::{UploadEvent, UploadStream, progress_body};
use crate::domains::auth::TokenStore;
use crate::infra::api_client::ApiClient;
use crate::infra::constants::routes;
use crate::infra::errors::{ClientResult, StorageResult};

/// Operations against the backend user resource plus the local list cache
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryService: Send + Sync {
    async fn get_users(&self) -> ClientResult<Vec<User>>;

    async fn add_user(&self, form: UserForm) -> ClientResult<User>;

    async fn update_user(&self, form: UserForm) -> ClientResult<User>;

    async fn reset_password(&self, email: &str) -> ClientResult<ServerMessage>;

    async fn delete_user(&self, username: &str) -> ClientResult<ServerMessage>;

    /// Start the upload and return its event stream. Must be called from
    /// within a tokio runtime.
    fn update_profile_image(
        &self,
        username: &str,
        image: ProfileImage,
    ) -> UploadStream;

    fn add_users_to_local_cache(&self, users: &[User]) -> StorageResult<()>;

    fn get_users_from_local_cache(&self) -> StorageResult<Option<Vec<User>>>;
}

#[derive(Debug, Clone)]
pub struct UserDirectoryClient {
    client: Arc<ApiClient>,
    store: TokenStore,
}

impl UserDirectoryClient {
    pub fn new(client: Arc<ApiClient>, store: TokenStore) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl UserDirectoryService for UserDirectoryClient {
    async fn get_users(&self) -> ClientResult<Vec<User>> {
        let users: Vec<User> = self.client.get(routes::user::LIST).await?;
        debug!("[UserDirectory] Fetched {} users", users.len());
        Ok(users)
    }

    async fn add_user(&self, form: UserForm) -> ClientResult<User> {
        let multipart = form.into_multipart()?;
        self.client
            .post_multipart(routes::user::ADD, multipart)
            .await
    }

    async fn update_user(&self, form: UserForm) -> ClientResult<User> {
        let multipart = form.into_multipart()?;
        self.client
            .post_multipart(routes::user::UPDATE, multipart)
            .await
    }

    async fn reset_password(&self, email: &str) -> ClientResult<ServerMessage> {
        let url = self.client.route_url(
            routes::user::RESET_PASSWORD,
            "{email}",
            email,
        )?;
        self.client.get(url.as_str()).await
    }

    async fn delete_user(&self, username: &str) -> ClientResult<ServerMessage> {
        let url =
            self.client
                .route_url(routes::user::DELETE, "{username}", username)?;
        let message: ServerMessage = self.client.delete(url.as_str()).await?;
        info!("[UserDirectory] Deleted {}", username);
        Ok(message)
    }

    fn update_profile_image(
        &self,
        username: &str,
        image: ProfileImage,
    ) -> UploadStream {
        let (events, receiver) = mpsc::unbounded_channel();
        let client = Arc::clone(&self.client);
        let username = username.to_string();

        tokio::spawn(async move {
            let result =
                upload_profile_image(&client, username, image, events.clone())
                    .await;
            let _ = events.send(result.map(UploadEvent::Response));
        });

        UnboundedReceiverStream::new(receiver).boxed()
    }

    fn add_users_to_local_cache(&self, users: &[User]) -> StorageResult<()> {
        self.store.save_users(users)
    }

    fn get_users_from_local_cache(&self) -> StorageResult<Option<Vec<User>>> {
        self.store.users()
    }
}

async fn upload_profile_image(
    client: &ApiClient,
    username: String,
    image: ProfileImage,
    events: mpsc::UnboundedSender<ClientResult<UploadEvent>>,
) -> ClientResult<User> {
    let total = image.len();
    let body = progress_body(image.bytes, events.clone());
    let part = Part::stream_with_length(body, total)
        .file_name(image.file_name)
        .mime_str(&image.content_type)?;
    let form = Form::new()
        .text("username", username)
        .part("profileImage", part);

    let builder = client
        .request(Method::POST, routes::user::UPDATE_PROFILE_IMAGE)
        .multipart(form);
    let _ = events.send(Ok(UploadEvent::Sent));
    client.execute_json(builder).await
}
