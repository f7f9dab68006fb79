//! # TPI Connector
//!
//! A Rust client for the REST API of tpi-compliance applications: owners,
//! resources, transactions and handler actions exposed as typed async calls.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the base URL and API key
//! - A [`RestClient`] with one method per REST operation
//! - Best-effort response normalization into [`ApiResult`]
//! - A long-running action protocol reporting a [`TaskStatus`]
//!
//! ## Quick Start
//!
//! ```rust
//! use tpi_connector::{ApiKey, BaseUrl, ClientConfig, RestClient};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://tpi.example.com/api").unwrap())
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .verify_tls(true)
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::new(config).unwrap();
//! assert!(client.headers(None).contains_key("TPI_API_KEY"));
//! ```
//!
//! ## Resource Operations
//!
//! ```rust,ignore
//! use serde_json::json;
//! use tpi_connector::{ApiResult, ClientConfig, RestClient};
//!
//! let client = RestClient::new(ClientConfig::new("https://tpi.example.com/api", "key")?)?;
//!
//! client.create("acme", "vm", "db1", &json!({"cpu": 2}), Some("T1")).await?;
//!
//! match client.read_log("acme", "vm", "db1", Some("T1")).await? {
//!     ApiResult::Json(log) => println!("{log:#}"),
//!     ApiResult::Raw(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
//!     ApiResult::Empty => println!("no log"),
//! }
//! ```
//!
//! ## Long-Running Actions
//!
//! ```rust,ignore
//! use tpi_connector::TaskStatus;
//!
//! let report = client
//!     .invoke_long_running("acme", "vm", "db1", "backup", &json!({}), Some("T2"))
//!     .await?;
//!
//! match report.task_status {
//!     TaskStatus::Running => { /* poll read_transaction with "T2" */ }
//!     TaskStatus::Successful => {}
//!     TaskStatus::Conflict => { /* another backup holds the task */ }
//!     TaskStatus::Failed => { /* an unlock has already been attempted */ }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Best-effort results**: Non-success statuses and undecodable bodies are values, not errors

pub mod clients;
pub mod config;
pub mod error;

pub use config::{ApiKey, BaseUrl, ClientConfig, ClientConfigBuilder, Timeouts};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiResult, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    TransportFault,
};

// Re-export REST client types
pub use clients::rest::{ResourceLocator, RestClient, TaskReport, TaskStatus};
