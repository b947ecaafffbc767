//! Repository for the `tasks` table.

use projecthub_core::task_state::TaskState;
use projecthub_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, due_date, project_id, assigned_to, assigned_by, \
                       status, progress, created_at, updated_at";

/// Provides persistence operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task in its initial state, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let initial = TaskState::initial();
        let query = format!(
            "INSERT INTO tasks
                (title, description, due_date, project_id, assigned_to, assigned_by, status, progress)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.project_id)
            .bind(input.assigned_to)
            .bind(input.assigned_by)
            .bind(initial.status.as_str())
            .bind(initial.progress)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every task of a project, oldest first.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Progress values of every task in a project.
    pub async fn list_progress_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT progress FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update plain task fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                due_date = COALESCE($4, due_date),
                assigned_to = COALESCE($5, assigned_to)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.assigned_to)
            .fetch_optional(pool)
            .await
    }

    /// Persist a task's status/progress pair.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_state(
        pool: &PgPool,
        id: DbId,
        state: &TaskState,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $2, progress = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(state.status.as_str())
            .bind(state.progress)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every task of a project with the completed state.
    ///
    /// Runs inside the caller's transaction. Returns the number of rows changed.
    pub async fn complete_all_for_project(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let completed = TaskState::completed();
        let result =
            sqlx::query("UPDATE tasks SET status = $2, progress = $3 WHERE project_id = $1")
                .bind(project_id)
                .bind(completed.status.as_str())
                .bind(completed.progress)
                .execute(&mut **tx)
                .await?;
        Ok(result.rows_affected())
    }
}
