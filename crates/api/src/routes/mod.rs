//! Route tree.

pub mod health;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST   /auth/signup                                   signup
/// POST   /auth/login                                    login
///
/// GET    /profile/{uid}                                 profile + skills
/// PUT    /profile/{uid}                                 wholesale update
///
/// GET    /projects                                      filtered listing
/// POST   /projects                                      create (caller becomes leader)
/// GET    /projects/me                                   led or accepted-into
/// GET    /projects/{id}                                 details
/// PATCH  /projects/{id}/status                          leader-only transition
/// DELETE /projects/{id}                                 leader-only delete
/// GET    /projects/{id}/applications                    leader-only roster
///
/// POST   /applications/apply                            apply
/// GET    /applications/me                               my applications
/// PATCH  /applications/{project_id}/{applicant_id}/status   leader decision
///
/// POST   /reviews                                       peer review (Completed only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/profile/{uid}",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route(
            "/projects",
            get(handlers::project::list).post(handlers::project::create),
        )
        .route("/projects/me", get(handlers::project::list_mine))
        .route(
            "/projects/{id}",
            get(handlers::project::get_details).delete(handlers::project::delete),
        )
        .route("/projects/{id}/status", patch(handlers::project::update_status))
        .route(
            "/projects/{id}/applications",
            get(handlers::application::list_for_project),
        )
        .route("/applications/apply", post(handlers::application::apply))
        .route("/applications/me", get(handlers::application::list_mine))
        .route(
            "/applications/{project_id}/{applicant_id}/status",
            patch(handlers::application::update_status),
        )
        .route("/reviews", post(handlers::review::create))
}
