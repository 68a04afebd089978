//! Handlers for `/profile`: read and wholesale-update a student's
//! profile and skill set.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use teammate_core::error::CoreError;
use teammate_db::models::student::{StudentProfile, UpdateProfile};
use teammate_db::repositories::StudentRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/profile/{uid}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<StudentProfile>> {
    let profile = StudentRepo::get_profile(&state.pool, &uid)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Student", &uid)))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile/{uid}
///
/// The skill list replaces the stored associations in full; omitted
/// skills are removed.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<StatusCode> {
    StudentRepo::update_profile(&state.pool, &uid, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}
