//! Handlers for the `/reviews` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use teammate_core::types::DbId;
use teammate_db::models::peer_review::{CreatePeerReview, PeerReview};
use teammate_db::repositories::PeerReviewRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub project_id: DbId,
    #[validate(length(min = 1))]
    pub reviewer_id: String,
    #[validate(length(min = 1))]
    pub reviewee_id: String,
    #[validate(range(min = 1, max = 5))]
    pub score: i32,
    #[serde(default)]
    pub comment: String,
}

/// POST /api/v1/reviews
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<PeerReview>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let review = PeerReviewRepo::create(
        &state.pool,
        &CreatePeerReview {
            project_id: input.project_id,
            reviewer_id: input.reviewer_id,
            reviewee_id: input.reviewee_id,
            score: input.score,
            comment: input.comment,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(review)))
}
