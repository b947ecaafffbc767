//! Route definitions for the `/tasks` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// PUT    /{id}              -> update
/// PUT    /{id}/status       -> update_status
/// PUT    /{id}/progress     -> update_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(task::update))
        .route("/{id}/status", put(task::update_status))
        .route("/{id}/progress", put(task::update_progress))
}
