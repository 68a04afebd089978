//! Peer review entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teammate_core::types::{DbId, Timestamp};

/// A peer review row. Reviews are written by project members about each
/// other once the project is Completed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PeerReview {
    pub review_id: DbId,
    pub project_id: DbId,
    pub reviewer_id: String,
    pub reviewee_id: String,
    pub score: i32,
    pub comment: String,
    pub created_at: Timestamp,
}

/// DTO for creating a peer review.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePeerReview {
    pub project_id: DbId,
    pub reviewer_id: String,
    pub reviewee_id: String,
    pub score: i32,
    pub comment: String,
}
