//! Handlers for task creation and the three task update operations.
//!
//! Status-set and progress-set are separate endpoints with separate guard
//! rules (see [`TaskState`]). Both, and task creation, finish by
//! recomputing the owning project's aggregate progress.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use projecthub_core::access::{AccessLevel, TASK_ENTITY};
use projecthub_core::dates::{self, DateInput};
use projecthub_core::error::CoreError;
use projecthub_core::membership::is_member;
use projecthub_core::task_state::{TaskState, TaskStatus};
use projecthub_core::types::DbId;
use projecthub_core::update::{supplied_id, supplied_text};
use projecthub_db::models::project::Project;
use projecthub_db::models::task::{CreateTask, Task, UpdateTask};
use projecthub_db::repositories::TaskRepo;
use serde::Deserialize;
use sqlx::PgPool;

use crate::engine::aggregation::recompute_project_progress;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::project::{load_authorized, required_text};
use crate::middleware::auth::AuthUser;
use crate::response::TaskResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects/{id}/tasks`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateInput>,
    pub assigned_to_id: Option<DbId>,
}

/// Request body for `PUT /tasks/{id}`. Empty values keep the stored ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateInput>,
    pub assigned_to_id: Option<DbId>,
}

/// Request body for `PUT /tasks/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// Request body for `PUT /tasks/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub progress: Option<i32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/projects/{id}/tasks
///
/// The assignee must already be a project member. The caller is recorded
/// as the assigner.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    let project =
        load_authorized(&state.pool, project_id, AccessLevel::Member, auth.user_id).await?;

    let assigned_to = supplied_id(input.assigned_to_id).ok_or_else(|| {
        AppError::Core(CoreError::Validation("'assignedToId' is required".into()))
    })?;
    ensure_assignable(&project, assigned_to)?;

    let title = required_text(input.title, "title")?;
    let description = required_text(input.description, "description")?;
    let due_date = dates::required(input.due_date.as_ref(), "dueDate")?;

    let task = TaskRepo::create(
        &state.pool,
        &CreateTask {
            title,
            description,
            due_date,
            project_id,
            assigned_to,
            assigned_by: auth.user_id,
        },
    )
    .await?;

    tracing::info!(task_id = task.id, project_id, assigned_to, "Task created");

    recompute_project_progress(&state.pool, project_id).await;

    let response = TaskResponse::build(&state.pool, task).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/tasks/{id}
///
/// Updates title, description, due date and assignee. Does not touch
/// status or progress, so the project aggregate is left alone.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    let (_task, project) = load_task_authorized(&state.pool, id, auth.user_id).await?;

    let assigned_to = supplied_id(input.assigned_to_id);
    if let Some(assignee) = assigned_to {
        ensure_assignable(&project, assignee)?;
    }

    let changes = UpdateTask {
        title: supplied_text(input.title),
        description: supplied_text(input.description),
        due_date: dates::optional(input.due_date.as_ref(), "dueDate")?,
        assigned_to,
    };

    let task = TaskRepo::update_fields(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(TaskResponse::build(&state.pool, task).await?))
}

/// PUT /api/tasks/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<TaskResponse>> {
    let (task, _project) = load_task_authorized(&state.pool, id, auth.user_id).await?;

    let status: TaskStatus = input
        .status
        .ok_or_else(|| AppError::Core(CoreError::Validation("'status' is required".into())))?
        .parse()?;
    let next = task.state()?.with_status(status);

    write_state(&state.pool, &task, &next).await
}

/// PUT /api/tasks/{id}/progress
pub async fn update_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProgressRequest>,
) -> AppResult<Json<TaskResponse>> {
    let (task, _project) = load_task_authorized(&state.pool, id, auth.user_id).await?;

    let progress = input.progress.ok_or_else(|| {
        AppError::Core(CoreError::Validation("'progress' is required".into()))
    })?;
    let next = task.state()?.with_progress(progress)?;

    write_state(&state.pool, &task, &next).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a task and its project, then require member access to the project.
async fn load_task_authorized(
    pool: &PgPool,
    task_id: DbId,
    caller: DbId,
) -> AppResult<(Task, Project)> {
    let task = TaskRepo::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;
    let project = load_authorized(pool, task.project_id, AccessLevel::Member, caller).await?;
    Ok((task, project))
}

/// Persist a new status/progress pair, then refresh the project aggregate.
async fn write_state(pool: &PgPool, task: &Task, next: &TaskState) -> AppResult<Json<TaskResponse>> {
    let updated = TaskRepo::update_state(pool, task.id, next)
        .await?
        .ok_or_else(|| task_not_found(task.id))?;

    tracing::debug!(
        task_id = task.id,
        status = %next.status,
        progress = next.progress,
        "Task state written",
    );

    recompute_project_progress(pool, task.project_id).await;

    Ok(Json(TaskResponse::build(pool, updated).await?))
}

fn ensure_assignable(project: &Project, assignee: DbId) -> AppResult<()> {
    if is_member(&project.member_ids, assignee) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(
            "Assignee must be a member of the project".into(),
        )))
    }
}

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: TASK_ENTITY,
        id,
    })
}
