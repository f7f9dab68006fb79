//! HTTP request types for the TPI connector.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to a TPI application.

use std::fmt;
use std::time::Duration;

use crate::config::Timeouts;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "TPI_API_KEY";

/// Header carrying the caller-supplied transaction id, when there is one.
pub const TRANSACTION_ID_HEADER: &str = "TPI_TRANSACTION_ID";

/// HTTP methods used by the TPI REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET, for reads. `read` also sends a body with it.
    Get,
    /// HTTP POST, for creation, handler attach and actions.
    Post,
    /// HTTP PUT, for handler migration.
    Put,
    /// HTTP PATCH, for resource updates.
    Patch,
    /// HTTP DELETE, for removal, handler detach and task unlock.
    Delete,
}

impl HttpMethod {
    /// Returns the matching `reqwest` method.
    #[must_use]
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to be sent to a TPI application.
///
/// `path` is relative to the client's base URL. `body` holds an owned
/// snapshot of the caller's payload, taken when the request is built.
///
/// # Example
///
/// ```rust
/// use tpi_connector::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "owner/acme/vm/db1")
///     .body(json!({"cpu": 2}))
///     .transaction_id(Some("T1"))
///     .build();
///
/// assert_eq!(request.transaction_id.as_deref(), Some("T1"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the base URL) for this request.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Transaction id sent in [`TRANSACTION_ID_HEADER`]. Never empty.
    pub transaction_id: Option<String>,
    /// Client-side timeout for the whole request.
    pub timeout: Duration,
    /// Skips certificate verification even when the client verifies.
    pub skip_tls_verification: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    transaction_id: Option<String>,
    timeout: Duration,
    skip_tls_verification: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            transaction_id: None,
            timeout: Timeouts::STANDARD,
            skip_tls_verification: false,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the transaction id. `None` and an empty id both leave it unset.
    #[must_use]
    pub fn transaction_id(mut self, transaction_id: Option<&str>) -> Self {
        self.transaction_id = transaction_id
            .filter(|id| !id.is_empty())
            .map(String::from);
        self
    }

    /// Sets the client-side timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends the request without verifying the server certificate.
    #[must_use]
    pub const fn skip_tls_verification(mut self) -> Self {
        self.skip_tls_verification = true;
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            transaction_id: self.transaction_id,
            timeout: self.timeout,
            skip_tls_verification: self.skip_tls_verification,
        }
    }
}
