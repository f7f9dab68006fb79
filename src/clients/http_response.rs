//! HTTP response types for the TPI connector.
//!
//! This module provides the raw [`HttpResponse`] and the normalized
//! [`ApiResult`] every resource operation returns.

/// A raw response from a TPI application: status code and undecoded body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The response body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            body: body.into(),
        }
    }

    /// Returns `true` if the status code is below 300.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code < 300
    }
}

/// Normalized outcome of a resource operation.
///
/// The remote API is consumed on a best-effort basis. A caller must be
/// ready for any of the three variants and none of them signals an error:
///
/// - status >= 300: [`ApiResult::Empty`], whatever the body says
/// - status < 300 and a JSON body: [`ApiResult::Json`]
/// - status < 300 and any other body, including an empty one: [`ApiResult::Raw`]
///
/// # Example
///
/// ```rust
/// use tpi_connector::{ApiResult, clients::HttpResponse};
/// use serde_json::json;
///
/// let ok = ApiResult::from_response(HttpResponse::new(200, r#"{"state":"up"}"#));
/// assert_eq!(ok.as_json(), Some(&json!({"state": "up"})));
///
/// let raw = ApiResult::from_response(HttpResponse::new(200, "plain text"));
/// assert_eq!(raw.as_raw(), Some(&b"plain text"[..]));
///
/// let missing = ApiResult::from_response(HttpResponse::new(404, r#"{"error":"gone"}"#));
/// assert!(missing.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResult {
    /// The body decoded as JSON.
    Json(serde_json::Value),
    /// The body could not be decoded as JSON and is returned unchanged.
    Raw(Vec<u8>),
    /// The call completed with a status of 300 or above.
    Empty,
}

impl ApiResult {
    /// Normalizes a raw response.
    #[must_use]
    pub fn from_response(response: HttpResponse) -> Self {
        if !response.is_ok() {
            return Self::Empty;
        }
        match serde_json::from_slice(&response.body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(response.body),
        }
    }

    /// Returns `true` for [`ApiResult::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the decoded JSON value, if any.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the raw body, if the body was not JSON.
    #[must_use]
    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Self::Raw(body) => Some(body),
            _ => None,
        }
    }

    /// Consumes the result, returning the decoded JSON value, if any.
    #[must_use]
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl From<HttpResponse> for ApiResult {
    fn from(response: HttpResponse) -> Self {
        Self::from_response(response)
    }
}
