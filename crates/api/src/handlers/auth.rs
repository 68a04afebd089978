//! Handlers for `/auth`: signup and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use teammate_db::models::student::CreateStudent;
use teammate_db::repositories::StudentRepo;
use validator::Validate;

use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 64))]
    pub uid: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub uid: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub profile_text: String,
    pub website_link: String,
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<StatusCode> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let hashed_password = password::hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    StudentRepo::create(
        &state.pool,
        &CreateStudent {
            uid: input.uid,
            name: input.name,
            hashed_password,
        },
    )
    .await?;
    Ok(StatusCode::CREATED)
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let student = StudentRepo::find_by_uid(&state.pool, &input.uid)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid uid or password".into()))?;

    let verified = password::verify_password(&input.password, &student.hashed_password)
        .map_err(|e| AppError::InternalError(format!("password verification failed: {e}")))?;
    if !verified {
        return Err(AppError::Unauthorized("invalid uid or password".into()));
    }

    Ok(Json(LoginResponse {
        uid: student.uid,
        name: student.name,
        email: student.email.unwrap_or_default(),
        profile_text: student.profile_text.unwrap_or_default(),
        website_link: student.website_link.unwrap_or_default(),
    }))
}
