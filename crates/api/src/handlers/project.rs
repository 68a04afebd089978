//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use teammate_core::error::CoreError;
use teammate_core::types::{Date, DbId};
use teammate_db::models::project::{
    CreateProject, MyProject, ProjectDetails, ProjectFilter, ProjectSummary,
};
use teammate_db::models::status::ProjectStatus;
use teammate_db::repositories::ProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::CallerQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1))]
    pub leader_id: String,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    pub description1: String,
    pub description2: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    pub deadline: Date,
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateProjectResponse {
    pub project_id: DbId,
}

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    pub viewer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectStatusUpdateRequest {
    pub new_status: ProjectStatus,
    pub leader_id: String,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<CreateProjectResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let project_id = ProjectRepo::create_with_skills(
        &state.pool,
        &CreateProject {
            leader_id: input.leader_id,
            topic: input.topic,
            description1: input.description1,
            description2: input.description2,
            capacity: input.capacity,
            deadline: input.deadline,
            skills: input.skills,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(CreateProjectResponse { project_id })))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<Vec<ProjectSummary>>> {
    let projects = ProjectRepo::list(&state.pool, &filter).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/me
pub async fn list_mine(
    State(state): State<AppState>,
    Query(caller): Query<CallerQuery>,
) -> AppResult<Json<Vec<MyProject>>> {
    let projects = ProjectRepo::list_mine(&state.pool, &caller.current_user_id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_details(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<DetailsQuery>,
) -> AppResult<Json<ProjectDetails>> {
    let details = ProjectRepo::details(&state.pool, id, query.viewer_id.as_deref())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", id)))?;
    Ok(Json(details))
}

/// PATCH /api/v1/projects/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProjectStatusUpdateRequest>,
) -> AppResult<StatusCode> {
    ProjectRepo::update_status(&state.pool, id, &input.leader_id, input.new_status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(caller): Query<CallerQuery>,
) -> AppResult<StatusCode> {
    ProjectRepo::delete(&state.pool, id, &caller.current_user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
