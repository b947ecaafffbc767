//! Response shapes returned by the project and task handlers.
//!
//! Every embedded user reference is a [`UserSummary`] and every date is
//! serialized as integer epoch milliseconds. Project responses always carry
//! the project's full task list inline.

use std::collections::HashMap;

use projecthub_core::task_state::TaskStatus;
use projecthub_core::types::{DbId, Timestamp};
use projecthub_db::models::project::Project;
use projecthub_db::models::task::Task;
use projecthub_db::models::user::UserSummary;
use projecthub_db::repositories::{TaskRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Token plus the authenticated user, returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// A task with its assignee and assigner populated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub due_date: Timestamp,
    pub project_id: DbId,
    pub assigned_to: UserSummary,
    pub assigned_by: UserSummary,
    pub status: TaskStatus,
    pub progress: i32,
}

/// A project with its creator, members and tasks populated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: DbId,
    pub name: String,
    pub description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_date: Timestamp,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_date: Timestamp,
    pub created_by: UserSummary,
    pub members: Vec<UserSummary>,
    pub tasks: Vec<TaskResponse>,
    pub is_completed: bool,
    pub progress: i32,
}

/// Summaries for a batch of user ids, loaded in one query.
struct UserDirectory {
    users: HashMap<DbId, UserSummary>,
}

impl UserDirectory {
    async fn load(pool: &PgPool, ids: &[DbId]) -> Result<Self, sqlx::Error> {
        let users = UserRepo::find_summaries(pool, ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        Ok(Self { users })
    }

    /// A user the row references through a foreign key; absence is a
    /// broken invariant.
    fn required(&self, id: DbId) -> AppResult<UserSummary> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::InternalError(format!("Referenced user {id} is missing")))
    }

    /// Summaries for `ids` in order, skipping any that no longer exist.
    fn members(&self, ids: &[DbId]) -> Vec<UserSummary> {
        ids.iter().filter_map(|id| self.users.get(id).cloned()).collect()
    }
}

fn task_user_ids(tasks: &[Task]) -> impl Iterator<Item = DbId> + '_ {
    tasks.iter().flat_map(|t| [t.assigned_to, t.assigned_by])
}

fn task_response(task: Task, users: &UserDirectory) -> AppResult<TaskResponse> {
    let status = task.status.parse::<TaskStatus>()?;
    Ok(TaskResponse {
        assigned_to: users.required(task.assigned_to)?,
        assigned_by: users.required(task.assigned_by)?,
        id: task.id,
        title: task.title,
        description: task.description,
        due_date: task.due_date,
        project_id: task.project_id,
        status,
        progress: task.progress,
    })
}

impl TaskResponse {
    /// Populate a single task's user references.
    pub async fn build(pool: &PgPool, task: Task) -> AppResult<Self> {
        let users = UserDirectory::load(pool, &[task.assigned_to, task.assigned_by]).await?;
        task_response(task, &users)
    }
}

impl ProjectResponse {
    /// Load the project's tasks and populate every user reference.
    pub async fn build(pool: &PgPool, project: Project) -> AppResult<Self> {
        let tasks = TaskRepo::list_by_project(pool, project.id).await?;

        let mut ids = project.member_ids.clone();
        ids.push(project.created_by);
        ids.extend(task_user_ids(&tasks));
        ids.sort_unstable();
        ids.dedup();
        let users = UserDirectory::load(pool, &ids).await?;

        let tasks = tasks
            .into_iter()
            .map(|t| task_response(t, &users))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(ProjectResponse {
            created_by: users.required(project.created_by)?,
            members: users.members(&project.member_ids),
            tasks,
            id: project.id,
            name: project.name,
            description: project.description,
            start_date: project.start_date,
            end_date: project.end_date,
            is_completed: project.is_completed,
            progress: project.progress,
        })
    }

    /// Build responses for several projects, in order.
    pub async fn build_all(pool: &PgPool, projects: Vec<Project>) -> AppResult<Vec<Self>> {
        let mut out = Vec::with_capacity(projects.len());
        for project in projects {
            out.push(Self::build(pool, project).await?);
        }
        Ok(out)
    }
}
