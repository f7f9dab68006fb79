//! HTTP client for TPI application communication.
//!
//! This module provides the [`HttpClient`] type, which owns the connection
//! settings and sends exactly one HTTP request per call.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpRequest, API_KEY_HEADER, TRANSACTION_ID_HEADER};
use crate::clients::http_response::HttpResponse;
use crate::config::ClientConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to a TPI application.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - The API key header and the optional transaction id header
/// - The TLS verification setting
/// - Per-request timeouts
///
/// It never retries and never interprets the status code; that is left to
/// the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Client for requests that skip certificate verification. Only built
    /// when `client` verifies certificates.
    unverified_client: Option<reqwest::Client>,
    /// Connection settings.
    config: ClientConfig,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client. No network activity takes place.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if the underlying reqwest client
    /// cannot be created (e.g., TLS backend initialization failure).
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}TPI Connector v{SDK_VERSION} | Rust {rust_version}");

        let client = build_client(&user_agent, config.verify_tls())?;
        let unverified_client = if config.verify_tls() {
            Some(build_client(&user_agent, false)?)
        } else {
            None
        };

        Ok(Self {
            client,
            unverified_client,
            config,
        })
    }

    /// Returns the connection settings of this client.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the headers sent with a request carrying `transaction_id`.
    ///
    /// The map always holds the API key. The transaction id entry is added
    /// only for a non-empty id.
    #[must_use]
    pub fn headers(&self, transaction_id: Option<&str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            API_KEY_HEADER.to_string(),
            self.config.api_key().as_ref().to_string(),
        );
        if let Some(id) = transaction_id.filter(|id| !id.is_empty()) {
            headers.insert(TRANSACTION_ID_HEADER.to_string(), id.to_string());
        }
        headers
    }

    /// Returns the absolute URL for a path relative to the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url())
    }

    /// Sends a request and returns the raw response.
    ///
    /// Any status code is a successful return; only transport failures are
    /// errors. The timeout covers reading the body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the connection fails, the request
    /// times out, or the body cannot be read.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let res = self.send(&request).await?;
        let code = res.status().as_u16();
        let body = res.bytes().await?.to_vec();

        Ok(HttpResponse::new(code, body))
    }

    /// Sends a request and returns its status code as soon as the response
    /// head arrives.
    ///
    /// The body is never read, so a slow body cannot push the call past its
    /// timeout. The connection is closed when the response is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the connection fails or no response
    /// head arrives within the timeout.
    pub async fn request_status(&self, request: HttpRequest) -> Result<u16, HttpError> {
        let res = self.send(&request).await?;
        Ok(res.status().as_u16())
    }

    /// Returns the reqwest client matching the request's TLS requirements.
    fn client_for(&self, request: &HttpRequest) -> &reqwest::Client {
        match &self.unverified_client {
            Some(unverified) if request.skip_tls_verification => unverified,
            _ => &self.client,
        }
    }

    async fn send(&self, request: &HttpRequest) -> Result<reqwest::Response, HttpError> {
        let url = self.url(&request.path);

        tracing::debug!(
            method = %request.http_method,
            url = %url,
            timeout = ?request.timeout,
            has_transaction_id = request.transaction_id.is_some(),
            skip_tls_verification = request.skip_tls_verification,
            "Sending request to TPI application"
        );

        let mut req_builder = self
            .client_for(request)
            .request(request.http_method.as_reqwest(), &url)
            .timeout(request.timeout);

        for (key, value) in self.headers(request.transaction_id.as_deref()) {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let res = req_builder.send().await?;

        tracing::debug!(
            method = %request.http_method,
            url = %url,
            status = res.status().as_u16(),
            "Received response from TPI application"
        );

        Ok(res)
    }
}

fn build_client(user_agent: &str, verify_tls: bool) -> Result<reqwest::Client, HttpError> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .danger_accept_invalid_certs(!verify_tls)
        .user_agent(user_agent)
        .build()
        .map_err(HttpError::ClientBuild)
}
