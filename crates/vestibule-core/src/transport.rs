//! HTTP client for the authentication backend.
//!
//! A pure protocol adapter: one login call, outcome normalized into
//! `Ok(SessionIdentity)` or a structured `AuthError`. No retries, no
//! caching, no deduplication; the only timeout is the one configured on
//! the underlying `reqwest::Client`.

use std::fmt;
use std::time::Duration;

use anyhow::Context;
use serde_json::Value;
use tracing::debug;

use crate::identity::{Credentials, SessionIdentity};

/// Categories of transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Non-2xx response from the backend
    HttpStatus,
    /// Connection or request timeout
    Timeout,
    /// Request never produced a response
    Network,
    /// Response arrived but could not be parsed
    Parse,
}

/// Structured failure from the login exchange.
#[derive(Debug, Clone)]
pub struct AuthError {
    /// Failure category
    pub kind: AuthErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Opaque exception tag from the backend's error body, when present
    pub backend_exception: Option<String>,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            backend_exception: None,
        }
    }

    /// Builds an error from a non-2xx response, pulling the `exception`
    /// tag out of the JSON error body when there is one.
    pub fn http_status(status: u16, body: &str) -> Self {
        let mut tag = None;
        if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(exception) = json.get("exception").and_then(|v| v.as_str())
        {
            tag = Some(exception.to_string());
        }

        let message = match &tag {
            Some(exception) => format!("HTTP {status}: {exception}"),
            None => format!("HTTP {status}"),
        };

        Self {
            kind: AuthErrorKind::HttpStatus,
            message,
            status: Some(status),
            backend_exception: tag,
        }
    }

    /// Wraps a request that failed before any response arrived.
    pub fn request(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            AuthErrorKind::Timeout
        } else {
            AuthErrorKind::Network
        };
        Self::new(kind, err.to_string())
    }

    /// Wraps a response body that could not be parsed.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Parse, message)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// Authentication backend client.
pub struct AuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthClient {
    /// Creates a client for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client with a request timeout on the underlying transport.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Submits credentials to the login endpoint.
    ///
    /// Exactly one request per call; concurrent calls are not deduplicated.
    ///
    /// # Errors
    /// Returns an `AuthError` describing the transport or backend failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::request(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = AuthError::http_status(status.as_u16(), &body);
            debug!(status = status.as_u16(), tag = ?err.backend_exception, "login rejected");
            return Err(err);
        }

        response
            .json::<SessionIdentity>()
            .await
            .map_err(|e| AuthError::parse(format!("invalid login response body: {e}")))
    }
}
