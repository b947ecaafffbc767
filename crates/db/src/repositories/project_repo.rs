//! Repository for the `projects` table.

use projecthub_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::repositories::TaskRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, start_date, end_date, created_by, member_ids, \
                       is_completed, progress, created_at, updated_at";

/// Provides persistence operations for projects.
///
/// Every mutation is a single-row read-modify-write except
/// [`ProjectRepo::force_complete`], which also rewrites the project's tasks.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, start_date, end_date, created_by, member_ids)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.created_by)
            .bind(&input.member_ids)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects the user created or is a member of, oldest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE created_by = $1 OR $1 = ANY(member_ids)
             ORDER BY id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                member_ids = COALESCE($6, member_ids)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.member_ids)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the member list. Returns `None` if the project does not exist.
    pub async fn set_members(
        pool: &PgPool,
        id: DbId,
        member_ids: &[DbId],
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET member_ids = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(member_ids)
            .fetch_optional(pool)
            .await
    }

    /// Store a recomputed aggregate progress. Returns `true` if a row was updated.
    pub async fn set_progress(pool: &PgPool, id: DbId, progress: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET progress = $2 WHERE id = $1")
            .bind(id)
            .bind(progress)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a project completed at 100% and force every one of its tasks to
    /// `COMPLETED`/100 in one transaction.
    ///
    /// This is a bulk overwrite; per-task transition rules are not consulted.
    /// Returns the number of tasks rewritten, or `None` if the project does
    /// not exist.
    pub async fn force_complete(pool: &PgPool, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE projects SET is_completed = true, progress = 100 WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let tasks = TaskRepo::complete_all_for_project(&mut tx, id).await?;

        tx.commit().await?;
        Ok(Some(tasks))
    }
}
