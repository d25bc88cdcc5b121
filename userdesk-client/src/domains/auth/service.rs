//! Login and registration calls
//!
//! Both endpoints are public; the
//! [`RequestAuthorizer`](crate::infra::RequestAuthorizer) lets them through
//! without a bearer header.

use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use reqwest::Method;
use userdesk_model::{LoginRequest, RegisterRequest, User};

use crate::infra::api_client::ApiClient;
use crate::infra::constants::routes;
use crate::infra::errors::{ClientError, ClientResult};

/// A successful login: the token from the response header and the user body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginOutcome>;

    async fn register(&self, request: &RegisterRequest) -> ClientResult<User>;
}

#[derive(Debug, Clone)]
pub struct AuthApiAdapter {
    client: Arc<ApiClient>,
    token_header: String,
}

impl AuthApiAdapter {
    pub fn new(
        client: Arc<ApiClient>,
        token_header: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_header: token_header.into(),
        }
    }
}

#[async_trait]
impl AuthGateway for AuthApiAdapter {
    async fn login(
        &self,
        request: &LoginRequest,
    ) -> ClientResult<LoginOutcome> {
        let builder = self
            .client
            .request(Method::POST, routes::user::LOGIN)
            .json(request);
        let response = self.client.send(builder).await?;

        let token = response
            .headers()
            .get(self.token_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ClientError::MissingTokenHeader(self.token_header.clone())
            })?;

        let user: User = response.json().await.map_err(|e| {
            ClientError::InvalidResponse(format!(
                "Failed to parse login response: {e}"
            ))
        })?;

        info!("[Auth] Logged in as {}", user.username);
        Ok(LoginOutcome { token, user })
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        let user: User =
            self.client.post(routes::user::REGISTER, request).await?;
        info!("[Auth] Registered {}", user.username);
        Ok(user)
    }
}
