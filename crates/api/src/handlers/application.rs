//! Handlers for the `/applications` resource and the leader-only
//! applicant roster.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use teammate_core::types::DbId;
use teammate_db::models::application::{
    Application, CreateApplication, MyApplication, ProjectApplicant,
};
use teammate_db::models::status::ApplicationStatus;
use teammate_db::repositories::ApplicationRepo;

use crate::error::AppResult;
use crate::handlers::CallerQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplicationStatusUpdateRequest {
    pub new_status: ApplicationStatus,
    pub leader_id: String,
}

/// POST /api/v1/applications/apply
pub async fn apply(
    State(state): State<AppState>,
    Json(input): Json<CreateApplication>,
) -> AppResult<(StatusCode, Json<Application>)> {
    let application = ApplicationRepo::apply(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications/me
pub async fn list_mine(
    State(state): State<AppState>,
    Query(caller): Query<CallerQuery>,
) -> AppResult<Json<Vec<MyApplication>>> {
    let applications =
        ApplicationRepo::list_by_applicant(&state.pool, &caller.current_user_id).await?;
    Ok(Json(applications))
}

/// GET /api/v1/projects/{project_id}/applications
///
/// Leader-only. An existing project with no applications yields an
/// empty list, not a 404.
pub async fn list_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(caller): Query<CallerQuery>,
) -> AppResult<Json<Vec<ProjectApplicant>>> {
    let applicants =
        ApplicationRepo::list_for_project(&state.pool, project_id, &caller.current_user_id)
            .await?;
    Ok(Json(applicants))
}

/// PATCH /api/v1/applications/{project_id}/{applicant_id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path((project_id, applicant_id)): Path<(DbId, String)>,
    Json(input): Json<ApplicationStatusUpdateRequest>,
) -> AppResult<StatusCode> {
    ApplicationRepo::update_status(
        &state.pool,
        project_id,
        &applicant_id,
        input.new_status,
        &input.leader_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
