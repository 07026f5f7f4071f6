//! # pal-http
//!
//! reqwest transport for the Palaver chatbot backend.
//!
//! [`ApiClient`] implements both [`pal_core::AuthTransport`] and
//! [`pal_core::ChatTransport`]. Session credentials travel as cookies: the
//! client keeps a cookie jar, echoes the `csrftoken` cookie as `X-CSRFToken`
//! on state-changing requests, and (optionally) persists the jar to disk so
//! separate CLI invocations share one server session.

mod auth;
mod chat;
pub mod cookie_store;
mod error;
mod http;

pub use error::ClientError;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pal_config::{ApiConfig, SessionConfig};
use pal_core::TransportError;
use reqwest::cookie::Jar;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::http::{check_response, map_reqwest};

/// Header carrying the CSRF token on POST/PUT/PATCH/DELETE.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP client for the chatbot REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
    cookie_file: Option<PathBuf>,
}

impl ApiClient {
    /// Build a client from configuration, restoring persisted cookies.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the base URL is invalid, the reqwest client
    /// fails to build, or the cookie file cannot be read.
    pub fn from_config(api: &ApiConfig, session: &SessionConfig) -> Result<Self, ClientError> {
        let base = api
            .normalized_base_url()
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: api.base_url.clone(),
                reason: e.to_string(),
            })?;
        let client = Self::build(
            &base,
            &api.user_agent,
            Duration::from_secs(api.timeout_secs),
            session.cookie_file(),
        )?;
        if let Some(path) = &client.cookie_file {
            cookie_store::restore(path, &client.jar, &client.base_url)?;
        }
        Ok(client)
    }

    /// Client for `base_url` with default settings and no cookie persistence.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the URL does not parse or the client fails to build.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        let api = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        let session = SessionConfig {
            persist_cookies: false,
            ..SessionConfig::default()
        };
        Self::from_config(&api, &session)
    }

    fn build(
        base: &str,
        user_agent: &str,
        timeout: Duration,
        cookie_file: Option<PathBuf>,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base).map_err(|e| ClientError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        Ok(Self {
            http,
            base_url,
            jar,
            cookie_file,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current CSRF token, if the server has set one.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        cookie_store::cookie_value(&self.jar, &self.base_url, cookie_store::CSRF_COOKIE)
    }

    /// Forget the persisted session. The in-memory jar is left alone; the
    /// server-side logout is what invalidates it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::CookieStore`] if the file cannot be removed.
    pub fn clear_persisted_cookies(&self) -> Result<(), ClientError> {
        match &self.cookie_file {
            Some(path) => cookie_store::delete(path),
            None => Ok(()),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Network(format!("invalid endpoint '{path}': {e}")))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let resp = self.send(Method::GET, path, None::<&()>).await?;
        resp.json().await.map_err(|e| map_reqwest(&e))
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(Method::POST, path, body).await?;
        resp.json().await.map_err(|e| map_reqwest(&e))
    }

    /// POST and ignore the response body.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), TransportError> {
        self.send(Method::POST, path, None::<&()>).await.map(drop)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, TransportError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(path)?;
        let state_changing = matches!(
            method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        );
        tracing::debug!(%method, %url, "api request");

        let mut request = self.http.request(method, url);
        if state_changing && let Some(token) = self.csrf_token() {
            request = request.header(CSRF_HEADER, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = request.send().await.map_err(|e| map_reqwest(&e));
        self.persist_cookies();
        check_response(result?).await
    }

    fn persist_cookies(&self) {
        if let Some(path) = &self.cookie_file
            && let Err(error) = cookie_store::save(path, &self.jar, &self.base_url)
        {
            tracing::warn!(%error, "failed to persist session cookies");
        }
    }
}
