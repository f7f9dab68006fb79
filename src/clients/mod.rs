//! HTTP client types for TPI application communication.
//!
//! This module provides the HTTP layer of the connector: request and
//! response models, the transport client, and the REST client built on top
//! of it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: Sends one authenticated request and returns the raw response
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw status and body
//! - [`ApiResult`]: The normalized outcome of a resource operation
//! - [`HttpError`]: Transport failures, classified by [`TransportFault`]
//! - [`rest::RestClient`]: One method per REST operation
//!
//! # Example
//!
//! ```rust,ignore
//! use tpi_connector::clients::{HttpClient, HttpMethod, HttpRequest};
//! use tpi_connector::ClientConfig;
//!
//! let client = HttpClient::new(ClientConfig::new("https://tpi.example.com", "key")?)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "owner/acme/vm")
//!     .transaction_id(Some("T1"))
//!     .build();
//!
//! let response = client.request(request).await?;
//! println!("status {}", response.code);
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, TransportFault};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    HttpMethod, HttpRequest, HttpRequestBuilder, API_KEY_HEADER, TRANSACTION_ID_HEADER,
};
pub use http_response::{ApiResult, HttpResponse};

// Re-export REST client types at the clients module level
pub use rest::{RestClient, TaskReport, TaskStatus};
