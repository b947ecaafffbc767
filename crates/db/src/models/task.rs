//! Task entity model and DTOs.

use projecthub_core::error::CoreError;
use projecthub_core::task_state::TaskState;
use projecthub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub due_date: Timestamp,
    pub project_id: DbId,
    pub assigned_to: DbId,
    /// Set once at creation; never updated.
    pub assigned_by: DbId,
    /// One of `PENDING`, `IN_PROGRESS`, `COMPLETED` (enforced by a CHECK constraint).
    pub status: String,
    pub progress: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// The task's coupled status/progress pair.
    pub fn state(&self) -> Result<TaskState, CoreError> {
        Ok(TaskState {
            status: self.status.parse()?,
            progress: self.progress,
        })
    }
}

/// DTO for creating a new task. Status and progress start at their initial values.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub due_date: Timestamp,
    pub project_id: DbId,
    pub assigned_to: DbId,
    pub assigned_by: DbId,
}

/// DTO for updating plain task fields. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub assigned_to: Option<DbId>,
}
