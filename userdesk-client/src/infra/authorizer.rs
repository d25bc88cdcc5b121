//! Request pipeline hook that attaches the bearer token
//!
//! Every request except login and register gets
//! `Authorization: Bearer <token>`, with the token re-read from durable
//! storage at dispatch time so a login or logout done elsewhere is honoured.

use std::sync::Arc;

use log::debug;
use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use super::constants::routes;
use super::errors::{ClientError, ClientResult};
use crate::domains::auth::SessionManager;

#[derive(Debug, Clone)]
pub struct RequestAuthorizer {
    session: Arc<SessionManager>,
    public_urls: Vec<String>,
}

impl RequestAuthorizer {
    /// `host` is the normalized API base URL, without a trailing slash.
    pub fn new(host: &str, session: Arc<SessionManager>) -> Self {
        let public_urls = routes::PUBLIC
            .iter()
            .map(|path| format!("{host}{path}"))
            .collect();
        Self {
            session,
            public_urls,
        }
    }

    /// Login and register go out untouched
    pub fn is_public(&self, url: &str) -> bool {
        self.public_urls.iter().any(|public| url.contains(public.as_str()))
    }

    pub fn authorize(&self, mut request: Request) -> ClientResult<Request> {
        if self.is_public(request.url().as_str()) {
            return Ok(request);
        }

        let Some(token) = self.session.load_token()? else {
            debug!(
                "[RequestAuthorizer] No stored token for {} {}",
                request.method(),
                request.url()
            );
            return Ok(request);
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(ClientError::InvalidTokenHeader)?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::{KeyValueStore, MemoryStore};
    use reqwest::{Method, Url};

    const HOST: &str = "http://localhost:8081";

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, Url::parse(&format!("{HOST}{path}")).unwrap())
    }

    #[test]
    fn public_check_matches_login_and_register_only() {
        let store = Arc::new(MemoryStore::new());
        let session = Arc::new(SessionManager::new(store));
        let authorizer = RequestAuthorizer::new(HOST, session);

        assert!(authorizer.is_public("http://localhost:8081/user/login"));
        assert!(authorizer.is_public("http://localhost:8081/user/register"));
        assert!(!authorizer.is_public("http://localhost:8081/user/list"));
        assert!(!authorizer.is_public("http://elsewhere/user/login"));
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let backing = Arc::new(MemoryStore::new());
        backing.set_item("token", "bad\ntoken").unwrap();
        let session = Arc::new(SessionManager::new(backing));
        let authorizer = RequestAuthorizer::new(HOST, session);

        let result = authorizer.authorize(request(Method::GET, "/user/list"));
        assert!(matches!(result, Err(ClientError::InvalidTokenHeader(_))));
    }

    #[test]
    fn header_is_marked_sensitive() {
        let backing = Arc::new(MemoryStore::new());
        backing.set_item("token", "abc.def.ghi").unwrap();
        let session = Arc::new(SessionManager::new(backing));
        let authorizer = RequestAuthorizer::new(HOST, session);

        let request = authorizer
            .authorize(request(Method::DELETE, "/user/delete/ann"))
            .unwrap();
        let header = request.headers().get(AUTHORIZATION).unwrap();
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().unwrap(), "Bearer abc.def.ghi");
    }
}
