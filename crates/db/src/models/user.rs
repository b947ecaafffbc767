//! User entity model and DTOs.

use projecthub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserSummary`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The embedded user reference used in every response.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub profile_picture_url: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Defaults to an empty string if omitted.
    pub profile_picture_url: Option<String>,
}
