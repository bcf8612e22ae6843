//! Black Excellence History REST API client.
//!
//! Every request goes through [`authorize`], which attaches
//! `Authorization: Bearer <token>` when the session holds a token and leaves
//! the request untouched otherwise. There is no retry, backoff, timeout or
//! caching: each call is exactly one round trip, and failures are returned
//! to the caller as [`ApiError`].
//!
//! Endpoint methods are grouped by area, each in its own `impl ApiClient`
//! block:
//!
//! - [`auth`] - register, login, logout, current user
//! - [`content`] - figures, events, categories and the AI historian
//! - [`cart`] - cart lines, orders, checkout sessions
//! - [`marketplace`] - products, categories, direct purchase
//! - [`subscriptions`] - plans and plan selection

pub mod auth;
pub mod cart;
pub mod content;
pub mod marketplace;
pub mod subscriptions;
pub mod types;

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;

/// Maximum number of body characters copied into log events.
const LOG_BODY_LIMIT: usize = 500;

/// Attach the bearer token to an outgoing request, if there is one.
#[must_use]
pub fn authorize(builder: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token.expose_secret()),
        None => builder,
    }
}

/// Client for the backend REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client bound to `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
                session,
            }),
        })
    }

    /// The session this client reads its token from.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an absolute endpoint path (`/api/...`) against the base URL,
    /// keeping any path prefix the base URL carries.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Start a request with the current token attached.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let builder = self.inner.client.request(method, self.endpoint(path)?);
        Ok(authorize(builder, self.inner.session.token().as_ref()))
    }

    /// Send a request and decode a successful JSON response.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            debug!(
                status = %status,
                path = %url,
                detail = ?detail,
                "API returned non-success status"
            );
            return Err(ApiError::Status { status, detail });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                path = %url,
                body = %body.chars().take(LOG_BODY_LIMIT).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Decode(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)?).await
    }
}

/// Error body shape used by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Pull the human-readable `detail` out of an error body.
///
/// The backend sends either a plain string or, for request validation
/// failures, a list of objects carrying `msg`.
fn extract_detail(body: &str) -> Option<String> {
    let detail = serde_json::from_str::<ErrorBody>(body).ok()?.detail?;

    match detail {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Array(items) => {
            let messages = items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s.clone()),
                    other => other.get("msg")?.as_str().map(str::to_string),
                })
                .collect::<Vec<_>>();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
