//! Best-effort recomputation of a project's aggregate progress.
//!
//! Runs after every task create, status-set and progress-set. The task
//! mutation has already been committed by the time this runs, so nothing in
//! here is allowed to fail the request: load and write errors are logged and
//! swallowed. Concurrent mutations may leave a stale aggregate that the next
//! task mutation overwrites.

use projecthub_core::progress::aggregate_or_fallback;
use projecthub_core::types::DbId;
use projecthub_db::repositories::{ProjectRepo, TaskRepo};
use sqlx::PgPool;

/// Re-read every task of `project_id`, compute the aggregate and write it
/// onto the project.
///
/// Returns the value that was computed (the fallback `0` if the task set
/// could not be loaded), whether or not the write succeeded.
pub async fn recompute_project_progress(pool: &PgPool, project_id: DbId) -> i32 {
    let loaded = TaskRepo::list_progress_by_project(pool, project_id).await;
    let (progress, load_err) = aggregate_or_fallback(loaded);

    if let Some(e) = load_err {
        tracing::error!(
            project_id,
            error = %e,
            "Failed to load tasks for progress aggregation, using fallback",
        );
    }

    match ProjectRepo::set_progress(pool, project_id, progress).await {
        Ok(true) => {
            tracing::debug!(project_id, progress, "Project progress recomputed");
        }
        Ok(false) => {
            tracing::warn!(project_id, "Project vanished before progress write");
        }
        Err(e) => {
            tracing::error!(
                project_id,
                progress,
                error = %e,
                "Failed to write project progress",
            );
        }
    }

    progress
}
