//! Repository for the `users` table.

use sqlx::PgPool;
use projecthub_core::types::DbId;

use crate::models::user::{CreateUser, User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, password_hash, profile_picture_url, created_at, updated_at";

/// Columns of the public [`UserSummary`] projection.
const SUMMARY_COLUMNS: &str = "id, name, email, profile_picture_url";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email violates `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, profile_picture_url)
             VALUES ($1, $2, $3, COALESCE($4, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.profile_picture_url)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List every user as a public summary, oldest first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, UserSummary>(&query).fetch_all(pool).await
    }

    /// Load public summaries for the given ids. Unknown ids are skipped and
    /// order is unspecified.
    pub async fn find_summaries(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = ANY($1)");
        sqlx::query_as::<_, UserSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Return the subset of `ids` that name existing users.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
