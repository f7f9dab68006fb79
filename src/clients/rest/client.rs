//! REST client implementation for TPI applications.
//!
//! This module provides the [`RestClient`] type, which exposes one async
//! method per REST operation of the TPI owner/resource API.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::clients::rest::path::{ResourceLocator, LOG_SEGMENT, TRANSACTION_SEGMENT};
use crate::clients::rest::task::{TaskReport, TaskStatus};
use crate::clients::{ApiResult, HttpClient, HttpError, HttpMethod, HttpRequest, TransportFault};
use crate::config::{ClientConfig, Timeouts};

/// REST API client for TPI applications.
///
/// Every operation issues exactly one HTTP request (plus an unlock request
/// when a long-running action fails) and normalizes the response into an
/// [`ApiResult`]. Status codes of 300 and above are not errors: they come
/// back as [`ApiResult::Empty`]. Only transport failures are returned as
/// [`HttpError`], except where an operation documents otherwise.
///
/// Every operation takes an optional transaction id, which is sent in the
/// `TPI_TRANSACTION_ID` header when present and non-empty.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use tpi_connector::{ClientConfig, RestClient};
/// use serde_json::json;
///
/// let config = ClientConfig::new("https://tpi.example.com/api", "my-api-key")?;
/// let client = RestClient::new(config)?;
///
/// if client.probe("admin").await? {
///     let vms = client.list("acme", "vm", None).await?;
///     client.create("acme", "vm", "db1", &json!({"cpu": 2}), Some("T1")).await?;
///     let log = client.read_log("acme", "vm", "db1", Some("T1")).await?;
/// }
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client. No network activity takes place.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if the underlying HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let http_client = HttpClient::new(config)?;
        Ok(Self { http_client })
    }

    /// Returns the connection settings of this client.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.http_client.config()
    }

    /// Returns the headers sent with a request carrying `transaction_id`.
    ///
    /// The map always contains `TPI_API_KEY`; it contains
    /// `TPI_TRANSACTION_ID` only when `transaction_id` is non-empty.
    #[must_use]
    pub fn headers(&self, transaction_id: Option<&str>) -> HashMap<String, String> {
        self.http_client.headers(transaction_id)
    }

    /// Checks that the application is reachable and accepts the API key.
    ///
    /// Reads the public record of `user_name`. Returns `Ok(true)` if the
    /// response status is below 300, and `Ok(false)` for any other status,
    /// a refused or dropped connection, or a timeout.
    ///
    /// The certificate is never verified here, whatever the client's
    /// `verify_tls` setting, and the response body is not read.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] only for transport failures that are neither a
    /// connection failure nor a timeout.
    pub async fn probe(&self, user_name: &str) -> Result<bool, HttpError> {
        let request = self.reachability_request(user_name);

        match self.http_client.request_status(request).await {
            Ok(code) => Ok(code < 300),
            Err(HttpError::Network(e)) => match TransportFault::classify(&e) {
                fault @ (TransportFault::Timeout | TransportFault::Connect) => {
                    tracing::debug!(?fault, user_name, "Probe could not reach TPI application");
                    Ok(false)
                }
                TransportFault::Other => Err(HttpError::Network(e)),
            },
            Err(e) => Err(e),
        }
    }

    /// Lists the resources of `resource_type` owned by `owner_name`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure.
    pub async fn list(
        &self,
        owner_name: &str,
        resource_type: &str,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::collection(owner_name, resource_type);
        self.call(
            HttpMethod::Get,
            locator.path(),
            None,
            transaction_id,
            self.timeouts().standard,
        )
        .await
    }

    /// Reads one resource.
    ///
    /// The payload is sent as a JSON body on the GET request. The remote
    /// API relies on it, so it is kept even though GET bodies are unusual.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure or if `payload` cannot be
    /// serialized.
    pub async fn read<P: Serialize + ?Sized>(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        payload: &P,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Get,
            locator.path(),
            Some(snapshot(payload)?),
            transaction_id,
            self.timeouts().standard,
        )
        .await
    }

    /// Creates a resource.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure or if `payload` cannot be
    /// serialized.
    pub async fn create<P: Serialize + ?Sized>(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        payload: &P,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Post,
            locator.path(),
            Some(snapshot(payload)?),
            transaction_id,
            self.timeouts().standard,
        )
        .await
    }

    /// Removes a resource.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure.
    pub async fn remove(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Delete,
            locator.path(),
            None,
            transaction_id,
            self.timeouts().standard,
        )
        .await
    }

    /// Partially updates a resource.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure or if `payload` cannot be
    /// serialized.
    pub async fn update<P: Serialize + ?Sized>(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        payload: &P,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Patch,
            locator.path(),
            Some(snapshot(payload)?),
            transaction_id,
            self.timeouts().standard,
        )
        .await
    }

    /// Reads the log of a resource, or of one of its transactions when
    /// `transaction_id` is given.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure.
    pub async fn read_log(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Get,
            locator.history_path(LOG_SEGMENT, transaction_id),
            None,
            transaction_id,
            self.timeouts().standard,
        )
        .await
    }

    /// Reads the transactions of a resource, or a single one when
    /// `transaction_id` is given.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure.
    pub async fn read_transaction(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Get,
            locator.history_path(TRANSACTION_SEGMENT, transaction_id),
            None,
            transaction_id,
            self.timeouts().standard,
        )
        .await
    }

    /// Attaches a handler to a resource.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure or if `payload` cannot be
    /// serialized.
    pub async fn attach<P: Serialize + ?Sized>(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        payload: &P,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Post,
            locator.handler_path(None),
            Some(snapshot(payload)?),
            transaction_id,
            self.timeouts().handler,
        )
        .await
    }

    /// Detaches the handler of a resource.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure.
    pub async fn detach(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Delete,
            locator.handler_path(None),
            None,
            transaction_id,
            self.timeouts().handler,
        )
        .await
    }

    /// Migrates the handler of a resource.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure or if `payload` cannot be
    /// serialized.
    pub async fn migrate<P: Serialize + ?Sized>(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        payload: &P,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Put,
            locator.handler_path(None),
            Some(snapshot(payload)?),
            transaction_id,
            self.timeouts().handler,
        )
        .await
    }

    /// Runs a handler action and waits for its result.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure, including the action
    /// timeout elapsing, or if `payload` cannot be serialized.
    pub async fn invoke_action<P: Serialize + ?Sized>(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        action: &str,
        payload: &P,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Post,
            locator.handler_path(Some(action)),
            Some(snapshot(payload)?),
            transaction_id,
            self.timeouts().action,
        )
        .await
    }

    /// Releases the lock a handler action holds on its task.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on transport failure.
    pub async fn unlock_task(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        action: &str,
        transaction_id: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        self.call(
            HttpMethod::Delete,
            locator.handler_path(Some(action)),
            None,
            transaction_id,
            self.timeouts().standard,
        )
        .await
    }

    /// Starts a handler action that may outlive the request.
    ///
    /// The action is posted with the short `long_running` timeout, which
    /// only waits for the response status. The body is never read.
    ///
    /// | Outcome | Report |
    /// |---|---|
    /// | no response within the timeout | [`TaskStatus::Running`] |
    /// | status 200 | [`TaskStatus::Successful`] |
    /// | status 409 | [`TaskStatus::Conflict`] |
    /// | any other status | [`TaskStatus::Failed`], after [`unlock_task`](Self::unlock_task) |
    ///
    /// A running task keeps going on the remote side; poll
    /// [`read_transaction`](Self::read_transaction) or call again until the
    /// status is terminal. The unlock on failure is best-effort: if it fails
    /// itself, a warning is logged and the report is still `Failed`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures other than the timeout,
    /// or if `payload` cannot be serialized.
    pub async fn invoke_long_running<P: Serialize + ?Sized>(
        &self,
        owner_name: &str,
        resource_type: &str,
        resource_name: &str,
        action: &str,
        payload: &P,
        transaction_id: Option<&str>,
    ) -> Result<TaskReport, HttpError> {
        let locator = ResourceLocator::resource(owner_name, resource_type, resource_name);
        let request = HttpRequest::builder(HttpMethod::Post, locator.handler_path(Some(action)))
            .body(snapshot(payload)?)
            .transaction_id(transaction_id)
            .timeout(self.timeouts().long_running)
            .build();
        let sent_transaction_id = request.transaction_id.clone();
        let report = |status| TaskReport::new(status, sent_transaction_id.as_deref());

        let code = match self.http_client.request_status(request).await {
            Ok(code) => code,
            Err(e) if e.is_timeout() => {
                tracing::info!(
                    action,
                    transaction_id = sent_transaction_id.as_deref().unwrap_or_default(),
                    "Long-running task still in progress after the wait window"
                );
                return Ok(report(TaskStatus::Running));
            }
            Err(e) => return Err(e),
        };

        let status = match code {
            200 => TaskStatus::Successful,
            409 => TaskStatus::Conflict,
            code => {
                tracing::warn!(
                    action,
                    status = code,
                    transaction_id = sent_transaction_id.as_deref().unwrap_or_default(),
                    "Long-running task failed, unlocking it"
                );
                if let Err(e) = self
                    .unlock_task(
                        owner_name,
                        resource_type,
                        resource_name,
                        action,
                        sent_transaction_id.as_deref(),
                    )
                    .await
                {
                    tracing::warn!(action, error = %e, "Failed to unlock task");
                }
                TaskStatus::Failed
            }
        };

        Ok(report(status))
    }

    fn reachability_request(&self, user_name: &str) -> HttpRequest {
        let locator = ResourceLocator::public_user(user_name);
        HttpRequest::builder(HttpMethod::Get, locator.path())
            .timeout(self.timeouts().standard)
            .skip_tls_verification()
            .build()
    }

    const fn timeouts(&self) -> &Timeouts {
        self.config().timeouts()
    }

    /// Internal helper to build, send and normalize a request.
    async fn call(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<serde_json::Value>,
        transaction_id: Option<&str>,
        timeout: Duration,
    ) -> Result<ApiResult, HttpError> {
        let mut builder = HttpRequest::builder(method, path)
            .transaction_id(transaction_id)
            .timeout(timeout);

        if let Some(body_value) = body {
            builder = builder.body(body_value);
        }

        let response = self.http_client.request(builder.build()).await?;
        Ok(ApiResult::from_response(response))
    }
}

/// Takes an owned JSON snapshot of a caller's payload.
fn snapshot<P: Serialize + ?Sized>(payload: &P) -> Result<serde_json::Value, HttpError> {
    Ok(serde_json::to_value(payload)?)
}
