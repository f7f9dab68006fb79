//! Configuration types for the TPI connector.
//!
//! This module provides the configuration used to construct a
//! [`RestClient`](crate::RestClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The connection settings held by one client
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`BaseUrl`]: A validated base URL of the remote application
//! - [`ApiKey`]: A validated API key with masked debug output
//! - [`Timeouts`]: Per-operation client-side timeouts
//!
//! # Example
//!
//! ```rust
//! use tpi_connector::{ApiKey, BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://tpi.example.com/api").unwrap())
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .verify_tls(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.verify_tls());
//! ```

mod newtypes;
mod timeouts;

pub use newtypes::{ApiKey, BaseUrl};
pub use timeouts::Timeouts;

use crate::error::ConfigError;

/// Connection settings for a TPI application.
///
/// A config is immutable once built. TLS certificate verification is
/// disabled unless explicitly enabled with
/// [`ClientConfigBuilder::verify_tls`]; clients talking to production
/// endpoints should turn it on.
///
/// # Example
///
/// ```rust
/// use tpi_connector::ClientConfig;
///
/// let config = ClientConfig::new("http://localhost:8080", "key").unwrap();
/// assert_eq!(config.base_url().as_ref(), "http://localhost:8080");
/// assert!(!config.verify_tls());
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: BaseUrl,
    api_key: ApiKey,
    verify_tls: bool,
    timeouts: Timeouts,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a config with default settings from raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URL or the API key fails validation.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder()
            .base_url(BaseUrl::new(base_url)?)
            .api_key(ApiKey::new(api_key)?)
            .build()
    }

    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Returns the per-operation timeouts.
    #[must_use]
    pub const fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Required fields are `base_url` and `api_key`.
///
/// # Defaults
///
/// - `verify_tls`: `false`
/// - `timeouts`: [`Timeouts::default`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<BaseUrl>,
    api_key: Option<ApiKey>,
    verify_tls: Option<bool>,
    timeouts: Option<Timeouts>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Sets the per-operation timeouts.
    #[must_use]
    pub const fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = Some(timeouts);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` or
    /// `api_key` are not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(ClientConfig {
            base_url,
            api_key,
            verify_tls: self.verify_tls.unwrap_or(false),
            timeouts: self.timeouts.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
