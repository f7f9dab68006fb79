//! Per-operation timeout settings.

use std::time::Duration;

/// Client-side timeouts applied to each class of operation.
///
/// The defaults match what the TPI applications are sized for:
///
/// | Field | Default | Used by |
/// |---|---|---|
/// | `standard` | 60 s | probe, CRUD, log/transaction reads, task unlock |
/// | `handler` | 180 s | handler attach, detach, migrate |
/// | `action` | 600 s | synchronous action invocation |
/// | `long_running` | 2 s | long-running task invocation |
///
/// The `long_running` window is intentionally short: a call still pending
/// when it elapses is reported as running, not as failed.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tpi_connector::Timeouts;
///
/// let timeouts = Timeouts::default().with_long_running(Duration::from_secs(5));
/// assert_eq!(timeouts.standard, Duration::from_secs(60));
/// assert_eq!(timeouts.long_running, Duration::from_secs(5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    /// Timeout for ordinary resource calls.
    pub standard: Duration,
    /// Timeout for handler attach, detach and migrate.
    pub handler: Duration,
    /// Timeout for synchronous action invocation.
    pub action: Duration,
    /// Window after which a long-running task is considered running.
    pub long_running: Duration,
}

impl Timeouts {
    /// Default timeout for ordinary resource calls.
    pub const STANDARD: Duration = Duration::from_secs(60);
    /// Default timeout for handler attach, detach and migrate.
    pub const HANDLER: Duration = Duration::from_secs(180);
    /// Default timeout for synchronous action invocation.
    pub const ACTION: Duration = Duration::from_secs(600);
    /// Default long-running task window.
    pub const LONG_RUNNING: Duration = Duration::from_secs(2);

    /// Overrides the standard timeout.
    #[must_use]
    pub const fn with_standard(mut self, timeout: Duration) -> Self {
        self.standard = timeout;
        self
    }

    /// Overrides the handler timeout.
    #[must_use]
    pub const fn with_handler(mut self, timeout: Duration) -> Self {
        self.handler = timeout;
        self
    }

    /// Overrides the action timeout.
    #[must_use]
    pub const fn with_action(mut self, timeout: Duration) -> Self {
        self.action = timeout;
        self
    }

    /// Overrides the long-running task window.
    #[must_use]
    pub const fn with_long_running(mut self, timeout: Duration) -> Self {
        self.long_running = timeout;
        self
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            standard: Self::STANDARD,
            handler: Self::HANDLER,
            action: Self::ACTION,
            long_running: Self::LONG_RUNNING,
        }
    }
}
