//! Project-scoped authorization.
//!
//! Two levels guard every project and task operation:
//!
//! - [`AccessLevel::Member`]: caller must appear in the project's member list.
//! - [`AccessLevel::Creator`]: caller must be the project's creator.
//!
//! Existence is always checked before access, so a missing project yields
//! `NotFound` for every caller and an existing one yields `Forbidden` for
//! outsiders.

use crate::error::CoreError;
use crate::membership::is_member;
use crate::types::DbId;

/// Entity name used in project `NotFound` errors.
pub const PROJECT_ENTITY: &str = "Project";

/// Entity name used in task `NotFound` errors.
pub const TASK_ENTITY: &str = "Task";

/// Required access level for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Member,
    Creator,
}

/// The ownership facts the gate needs from a project record.
pub trait ProjectAccess {
    fn created_by(&self) -> DbId;
    fn member_ids(&self) -> &[DbId];
}

/// Decide whether `caller` may act on `project` at `level`.
pub fn check_access<P: ProjectAccess>(
    project: &P,
    level: AccessLevel,
    caller: DbId,
) -> Result<(), CoreError> {
    let allowed = match level {
        AccessLevel::Member => is_member(project.member_ids(), caller),
        AccessLevel::Creator => project.created_by() == caller,
    };
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Access denied".into()))
    }
}

/// Resolve a freshly loaded project and authorize `caller` against it.
///
/// Returns `NotFound` when `project` is `None`, `Forbidden` when the caller
/// lacks `level`, and the project otherwise.
pub fn authorize<P: ProjectAccess>(
    project: Option<P>,
    project_id: DbId,
    level: AccessLevel,
    caller: DbId,
) -> Result<P, CoreError> {
    let project = project.ok_or(CoreError::NotFound {
        entity: PROJECT_ENTITY,
        id: project_id,
    })?;
    check_access(&project, level, caller)?;
    Ok(project)
}
