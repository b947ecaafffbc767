pub mod auth;
pub mod health;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/users                          list users (requires auth)
///
/// /projects                            list, create
/// /projects/{id}                       get, update (creator only)
/// /projects/{id}/complete              force-complete (PUT)
/// /projects/{id}/members               add members (PUT)
/// /projects/{id}/tasks                 create task (POST)
///
/// /tasks/{id}                          update fields (PUT)
/// /tasks/{id}/status                   set status (PUT)
/// /tasks/{id}/progress                 set progress (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
}
