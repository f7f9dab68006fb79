//! HTTP-specific error types for the TPI connector.
//!
//! Only transport failures and unserializable payloads are errors. A response with a non-success
//! status is normalized to [`ApiResult::Empty`](crate::ApiResult::Empty), and a
//! body that is not JSON is returned raw, so neither shows up here.
//!
//! # Transport Faults
//!
//! [`TransportFault`] classifies a failed request so that operations can
//! decide which faults they absorb:
//!
//! | Operation | `Timeout` | `Connect` | `Other` |
//! |---|---|---|---|
//! | `probe` | `Ok(false)` | `Ok(false)` | `Err` |
//! | `invoke_long_running` | `Ok(Running)` | `Err` | `Err` |
//! | every other operation | `Err` | `Err` | `Err` |
//!
//! # Example
//!
//! ```rust,ignore
//! use tpi_connector::{HttpError, TransportFault};
//!
//! match client.list("acme", "vm", None).await {
//!     Ok(result) => println!("{result:?}"),
//!     Err(e) if e.fault() == TransportFault::Timeout => println!("timed out"),
//!     Err(e) => println!("transport failure: {e}"),
//! }
//! ```

use thiserror::Error;

/// Kind of transport failure behind an [`HttpError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportFault {
    /// The request did not complete within its timeout.
    Timeout,
    /// The connection could not be established (refused, DNS, TLS handshake)
    /// or was lost before a complete response arrived (closed, reset).
    Connect,
    /// Any other failure, e.g. a request that could not be built.
    Other,
}

impl TransportFault {
    /// Classifies a `reqwest` error.
    ///
    /// Timeouts win over connect errors, so a connect timeout counts as a
    /// [`TransportFault::Timeout`]. A request that failed on the wire after
    /// the connection was made (the server hung up, reset the socket or sent
    /// an incomplete message) counts as [`TransportFault::Connect`].
    #[must_use]
    pub fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() || error.is_request() || connection_lost(error) {
            Self::Connect
        } else {
            Self::Other
        }
    }
}

/// Returns `true` if an I/O error in the source chain reports a dropped
/// connection.
fn connection_lost(error: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return matches!(
                io_error.kind(),
                std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::UnexpectedEof
            );
        }
        source = cause.source();
    }
    false
}

/// Unified error type for HTTP transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The underlying HTTP client could not be created.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request payload could not be converted to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the transport fault classification of this error.
    #[must_use]
    pub fn fault(&self) -> TransportFault {
        match self {
            Self::ClientBuild(_) | Self::Serialization(_) => TransportFault::Other,
            Self::Network(e) => TransportFault::classify(e),
        }
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.fault() == TransportFault::Timeout
    }

    /// Returns `true` if the connection could not be established or was lost
    /// before a response arrived.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        self.fault() == TransportFault::Connect
    }
}
