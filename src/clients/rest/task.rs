//! Status reporting for long-running handler actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a long-running action invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// No response arrived within the long-running window; the remote
    /// application keeps working on it.
    Running,
    /// The action completed with status 200.
    Successful,
    /// Another operation already holds the task (status 409).
    Conflict,
    /// The action answered with any other status. An unlock was attempted.
    Failed,
}

impl TaskStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Successful => "successful",
            Self::Conflict => "conflict",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` if the status will not change on its own.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task status paired with the transaction id the call carried.
///
/// Serializes to `{"task_status": "...", "transaction_id": "..."}`.
/// `transaction_id` is empty when the call had none.
///
/// # Example
///
/// ```rust
/// use tpi_connector::{TaskReport, TaskStatus};
///
/// let report = TaskReport::new(TaskStatus::Running, Some("T1"));
/// assert_eq!(
///     serde_json::to_string(&report).unwrap(),
///     r#"{"task_status":"running","transaction_id":"T1"}"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReport {
    /// The task outcome.
    pub task_status: TaskStatus,
    /// The transaction id sent with the call, or empty.
    pub transaction_id: String,
}

impl TaskReport {
    /// Creates a report for a call made with `transaction_id`.
    #[must_use]
    pub fn new(task_status: TaskStatus, transaction_id: Option<&str>) -> Self {
        Self {
            task_status,
            transaction_id: transaction_id.unwrap_or_default().to_string(),
        }
    }
}
