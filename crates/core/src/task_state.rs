//! Task status and progress coupling.
//!
//! A task carries a `status` and a `progress` percentage that nudge each
//! other when one of them is written. The two entry points are NOT mirror
//! images of each other:
//!
//! | Write               | Guard                       | Side effect                 |
//! |---------------------|-----------------------------|-----------------------------|
//! | status = COMPLETED  | none                        | progress = 100              |
//! | status = IN_PROGRESS| progress == 0               | progress = 50               |
//! | status = PENDING    | none                        | none                        |
//! | progress = 100      | none                        | status = COMPLETED          |
//! | progress > 0        | status == PENDING           | status = IN_PROGRESS        |
//!
//! Any status may be written at any time; there is no transition table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Progress value of a finished task.
pub const MAX_PROGRESS: i32 = 100;

/// Lowest valid progress value.
pub const MIN_PROGRESS: i32 = 0;

/// Progress assigned when an untouched task is marked in progress.
pub const STARTED_PROGRESS: i32 = 50;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// The stored/serialized representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TaskStatus::Pending),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "Invalid task status '{other}'. Must be one of: PENDING, IN_PROGRESS, COMPLETED"
            ))),
        }
    }
}

/// The coupled `(status, progress)` pair of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskState {
    pub status: TaskStatus,
    pub progress: i32,
}

impl TaskState {
    /// State of a freshly created task.
    pub const fn initial() -> Self {
        Self {
            status: TaskStatus::Pending,
            progress: MIN_PROGRESS,
        }
    }

    /// State written by the project force-complete bulk update.
    pub const fn completed() -> Self {
        Self {
            status: TaskStatus::Completed,
            progress: MAX_PROGRESS,
        }
    }

    /// Write `status`, applying its progress side effects.
    pub fn with_status(self, status: TaskStatus) -> Self {
        let progress = match status {
            TaskStatus::Completed => MAX_PROGRESS,
            TaskStatus::InProgress if self.progress == 0 => STARTED_PROGRESS,
            _ => self.progress,
        };
        Self { status, progress }
    }

    /// Write `progress`, applying its status side effects.
    ///
    /// Fails with [`CoreError::Validation`] when `progress` is outside
    /// `0..=100`; the state is left untouched in that case.
    pub fn with_progress(self, progress: i32) -> Result<Self, CoreError> {
        validate_progress(progress)?;
        let status = if progress == MAX_PROGRESS {
            TaskStatus::Completed
        } else if progress > 0 && self.status == TaskStatus::Pending {
            TaskStatus::InProgress
        } else {
            self.status
        };
        Ok(Self { status, progress })
    }
}

/// Validate that a progress value lies within `0..=100`.
pub fn validate_progress(progress: i32) -> Result<(), CoreError> {
    if (MIN_PROGRESS..=MAX_PROGRESS).contains(&progress) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Progress must be between {MIN_PROGRESS} and {MAX_PROGRESS}, got {progress}"
        )))
    }
}
