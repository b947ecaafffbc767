//! Project entity model and DTOs.

use projecthub_core::access::ProjectAccess;
use projecthub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub created_by: DbId,
    /// Ordered member list; always contains `created_by`.
    pub member_ids: Vec<DbId>,
    pub is_completed: bool,
    /// Derived from the project's tasks. Written only by aggregation and
    /// force-complete.
    pub progress: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectAccess for Project {
    fn created_by(&self) -> DbId {
        self.created_by
    }

    fn member_ids(&self) -> &[DbId] {
        &self.member_ids
    }
}

/// DTO for creating a new project. `member_ids` must already be normalized.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub created_by: DbId,
    pub member_ids: Vec<DbId>,
}

/// DTO for the creator-only project update. `None` keeps the stored value.
///
/// `member_ids`, when present, replaces the whole member list.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub member_ids: Option<Vec<DbId>>,
}
