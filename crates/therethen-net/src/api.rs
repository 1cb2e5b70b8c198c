//! Generic JSON request/response primitive.
//!
//! Every backend operation is a `(path, method, body, response)` tuple over
//! [`ApiClient::request`]; the endpoint modules only pick the tuple. Each
//! call is attempted exactly once.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use therethen_shared::ErrorResponse;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::AuthSession;

/// Authenticated client for the REST backend.
///
/// Cloning is cheap and clones share the connection pool and session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: AuthSession,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: AuthSession) -> Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn has_valid_auth_token(&self) -> bool {
        self.session.has_token()
    }

    /// Resolve a backend-relative route against the configured base.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidEndpoint(format!("{raw}: {e}")))
    }

    /// Issue one request and decode the typed response.
    ///
    /// Non-2xx responses become [`ApiError::ServerFailure`] carrying the
    /// server's `{"error": ..}` message when present; a 2xx body that does
    /// not decode as `T` becomes `ServerFailure("Decoding error: ..")`.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(bearer) = self.session.bearer() {
            builder = builder.header(AUTHORIZATION, bearer);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(%method, path, "API request");

        let response = builder.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "API transport failure");
            ApiError::NetworkFailure(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.ok();
            let err = server_failure(status, body.as_deref());
            warn!(%method, path, status = status.as_u16(), error = %err, "API request rejected");
            return Err(err);
        }

        let bytes = response.bytes().await?;
        decode_body(&bytes).map_err(|err| {
            warn!(%method, path, error = %err, "API response did not decode");
            err
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// POST without a body (action routes such as join/leave).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::POST, path, None).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }
}

/// Classify a non-2xx response body.
fn server_failure(status: StatusCode, body: Option<&[u8]>) -> ApiError {
    let code = status.as_u16();
    let Some(body) = body else {
        return ApiError::ServerFailure(format!("HTTP {code}"));
    };

    if let Ok(parsed) = serde_json::from_slice::<ErrorResponse>(body) {
        return ApiError::ServerFailure(parsed.error);
    }

    match std::str::from_utf8(body) {
        Ok(text) => ApiError::ServerFailure(format!("HTTP {code}: {text}")),
        Err(_) => ApiError::ServerFailure(format!("HTTP {code}")),
    }
}

fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::ServerFailure(format!("Decoding error: {e}")))
}

/// Append a single percent-encoded query pair to a route.
pub(crate) fn with_query(path: &str, key: &str, value: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{path}?{query}")
}
