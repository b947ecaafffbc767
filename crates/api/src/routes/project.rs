//! Route definitions for the `/projects` resource.
//!
//! Also nests task creation under `/projects/{id}/tasks`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// PUT    /{id}/complete     -> complete
/// PUT    /{id}/members      -> add_project_members
/// POST   /{id}/tasks        -> task::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id).put(project::update))
        .route("/{id}/complete", put(project::complete))
        .route("/{id}/members", put(project::add_project_members))
        .route("/{id}/tasks", post(task::create))
}
