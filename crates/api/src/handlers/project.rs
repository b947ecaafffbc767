//! Handlers for the `/projects` resource.
//!
//! Every handler re-reads the project before authorizing, so membership
//! decisions always use the latest stored member list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use projecthub_core::access::{self, AccessLevel, PROJECT_ENTITY};
use projecthub_core::dates::{self, DateInput};
use projecthub_core::error::CoreError;
use projecthub_core::membership::{add_members, normalize_members, replace_members, unknown_ids};
use projecthub_core::types::DbId;
use projecthub_core::update::{supplied_ids, supplied_text};
use projecthub_db::models::project::{CreateProject, Project, UpdateProject};
use projecthub_db::repositories::{ProjectRepo, UserRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ProjectResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateInput>,
    pub end_date: Option<DateInput>,
    #[serde(default)]
    pub member_ids: Vec<DbId>,
}

/// Request body for `PUT /projects/{id}`. Empty values keep the stored ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateInput>,
    pub end_date: Option<DateInput>,
    /// Replaces the member list when non-empty.
    pub member_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /projects/{id}/members`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMembersRequest {
    pub member_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects
///
/// Projects the caller created or is a member of.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(ProjectResponse::build_all(&state.pool, projects).await?))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    let name = required_text(input.name, "name")?;
    let description = required_text(input.description, "description")?;
    let start_date = dates::required(input.start_date.as_ref(), "startDate")?;
    let end_date = dates::required(input.end_date.as_ref(), "endDate")?;

    let member_ids = normalize_members(auth.user_id, &input.member_ids);
    ensure_users_exist(&state.pool, &member_ids).await?;

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            name,
            description,
            start_date,
            end_date,
            created_by: auth.user_id,
            member_ids,
        },
    )
    .await?;

    tracing::info!(
        project_id = project.id,
        created_by = auth.user_id,
        members = project.member_ids.len(),
        "Project created",
    );

    let response = ProjectResponse::build(&state.pool, project).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectResponse>> {
    let project = load_authorized(&state.pool, id, AccessLevel::Member, auth.user_id).await?;
    Ok(Json(ProjectResponse::build(&state.pool, project).await?))
}

/// PUT /api/projects/{id}
///
/// Creator only. A non-empty `memberIds` replaces the whole member list,
/// keeping the creator.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let project = load_authorized(&state.pool, id, AccessLevel::Creator, auth.user_id).await?;

    let member_ids =
        supplied_ids(input.member_ids).map(|ids| replace_members(project.created_by, &ids));
    if let Some(ids) = &member_ids {
        ensure_users_exist(&state.pool, ids).await?;
    }

    let changes = UpdateProject {
        name: supplied_text(input.name),
        description: supplied_text(input.description),
        start_date: dates::optional(input.start_date.as_ref(), "startDate")?,
        end_date: dates::optional(input.end_date.as_ref(), "endDate")?,
        member_ids,
    };

    let project = ProjectRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    Ok(Json(ProjectResponse::build(&state.pool, project).await?))
}

/// PUT /api/projects/{id}/complete
///
/// Marks the project and every one of its tasks as completed in one
/// transaction, bypassing the per-task transition rules.
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectResponse>> {
    load_authorized(&state.pool, id, AccessLevel::Member, auth.user_id).await?;

    let tasks_completed = ProjectRepo::force_complete(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    tracing::info!(
        project_id = id,
        user_id = auth.user_id,
        tasks_completed,
        "Project force-completed",
    );

    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(ProjectResponse::build(&state.pool, project).await?))
}

/// PUT /api/projects/{id}/members
///
/// Appends ids that are not yet members. Never removes anyone.
pub async fn add_project_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<AddMembersRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let project = load_authorized(&state.pool, id, AccessLevel::Member, auth.user_id).await?;

    let requested = input.member_ids.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Member IDs array is required".into(),
        ))
    })?;

    let merged = add_members(&project.member_ids, &requested);
    let project = if merged.len() > project.member_ids.len() {
        ensure_users_exist(&state.pool, &merged[project.member_ids.len()..]).await?;
        let added = merged.len() - project.member_ids.len();
        let project = ProjectRepo::set_members(&state.pool, id, &merged)
            .await?
            .ok_or_else(|| project_not_found(id))?;
        tracing::info!(project_id = id, added, "Project members added");
        project
    } else {
        project
    };

    Ok(Json(ProjectResponse::build(&state.pool, project).await?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a project fresh from the database and authorize `caller` at `level`.
///
/// A missing project is `NotFound` regardless of who asks.
pub(crate) async fn load_authorized(
    pool: &PgPool,
    project_id: DbId,
    level: AccessLevel,
    caller: DbId,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(pool, project_id).await?;
    Ok(access::authorize(project, project_id, level, caller)?)
}

/// Reject member lists naming users that do not exist.
async fn ensure_users_exist(pool: &PgPool, ids: &[DbId]) -> AppResult<()> {
    let known = UserRepo::existing_ids(pool, ids).await?;
    let unknown = unknown_ids(ids, &known);
    if unknown.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = unknown.iter().map(ToString::to_string).collect();
    Err(AppError::Core(CoreError::Validation(format!(
        "Unknown member ids: {}",
        listed.join(", ")
    ))))
}

pub(crate) fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    supplied_text(value)
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("'{field}' is required"))))
}

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: PROJECT_ENTITY,
        id,
    })
}
