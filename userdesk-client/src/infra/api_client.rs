use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use userdesk_model::ServerMessage;

use super::authorizer::RequestAuthorizer;
use super::errors::{ClientError, ClientResult};
use crate::domains::auth::SessionManager;
use crate::infra::constants::routes::replace_param;

/// Normalize a user-provided base URL.
///
/// Adds `http://` when no scheme is given and trims trailing slashes, so that
/// `localhost:8081/` and `http://localhost:8081` name the same host.
pub fn normalize_base_url(raw: &str) -> ClientResult<String> {
    let trimmed = raw.trim();
    let with_scheme =
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

    let parsed =
        Url::parse(&with_scheme).map_err(|source| ClientError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;
    let normalized = parsed.as_str().trim_end_matches('/').to_string();

    if normalized != raw {
        debug!(
            "[ApiClient] Normalized base URL from '{}' to '{}'",
            raw, normalized
        );
    }
    Ok(normalized)
}

/// HTTP client for the user-management backend
///
/// Every request is built, handed to the [`RequestAuthorizer`], then executed.
/// Non-success responses become [`ClientError::Api`] carrying the backend's
/// `message` when it sent one. There is no retry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    authorizer: RequestAuthorizer,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        session: Arc<SessionManager>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Ok(Self {
            authorizer: RequestAuthorizer::new(&base_url, session),
            client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authorizer(&self) -> &RequestAuthorizer {
        &self.authorizer
    }

    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL for a route whose last segment is `param`.
    ///
    /// `value` becomes exactly one path segment: `/`, `?`, `#` and other
    /// reserved characters in it are percent-encoded.
    pub fn route_url(
        &self,
        route: &str,
        param: &str,
        value: &str,
    ) -> ClientResult<Url> {
        let raw = self.build_url(&replace_param(route, param, ""));
        let invalid = |source| ClientError::InvalidUrl {
            url: raw.clone(),
            source,
        };

        let mut url = Url::parse(&raw).map_err(invalid)?;
        url.path_segments_mut()
            .map_err(|()| {
                invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?
            .pop_if_empty()
            .push(value);
        Ok(url)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.build_url(path))
    }

    /// Authorize, execute, and reject non-success statuses
    pub async fn send(
        &self,
        builder: RequestBuilder,
    ) -> ClientResult<Response> {
        let request = self.authorizer.authorize(builder.build()?)?;
        debug!("[ApiClient] {} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!(
            "[ApiClient] Request failed with status {}: {}",
            status,
            message.as_deref().unwrap_or("<no message>")
        );
        Err(ClientError::Api { status, message })
    }

    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> ClientResult<T> {
        let response = self.send(builder).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ClientError::InvalidResponse(
                "Empty response from server (204 No Content)".to_string(),
            ));
        }
        response.json::<T>().await.map_err(|e| {
            ClientError::InvalidResponse(format!(
                "Failed to parse response: {e}"
            ))
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> ClientResult<T> {
        self.execute_json(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute_json(self.request(Method::POST, path).json(body))
            .await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ClientResult<T> {
        self.execute_json(self.request(Method::POST, path).multipart(form))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> ClientResult<T> {
        self.execute_json(self.request(Method::DELETE, path)).await
    }
}

/// Pull the `message` field out of an error body, falling back to the raw
/// text when the body is not the backend's JSON envelope.
fn error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ServerMessage>(body) {
        return parsed.text().map(str::to_string);
    }
    let trimmed = body.trim();
    (!trimmed.is_empty() && !trimmed.starts_with('<'))
        .then(|| trimmed.to_string())
}
