//! Repository for the `peer_reviews` table.

use std::collections::HashMap;

use sqlx::PgPool;
use teammate_core::error::CoreError;

use crate::error::StoreError;
use crate::models::peer_review::{CreatePeerReview, PeerReview};
use crate::models::status::ProjectStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "review_id, project_id, reviewer_id, reviewee_id, score, comment, created_at";

/// Provides peer review operations.
pub struct PeerReviewRepo;

impl PeerReviewRepo {
    /// Record a review. Reviews may only be written once the project is
    /// Completed.
    pub async fn create(pool: &PgPool, input: &CreatePeerReview) -> Result<PeerReview, StoreError> {
        let status: Option<ProjectStatus> =
            sqlx::query_scalar("SELECT status FROM projects WHERE project_id = $1")
                .bind(input.project_id)
                .fetch_optional(pool)
                .await?;
        match status {
            None => return Err(CoreError::not_found("Project", input.project_id).into()),
            Some(ProjectStatus::Completed) => {}
            Some(_) => {
                return Err(CoreError::InvalidOperation(
                    "reviews may only be written after the project is completed".into(),
                )
                .into())
            }
        }

        let query = format!(
            "INSERT INTO peer_reviews (project_id, reviewer_id, reviewee_id, score, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, PeerReview>(&query)
            .bind(input.project_id)
            .bind(&input.reviewer_id)
            .bind(&input.reviewee_id)
            .bind(input.score)
            .bind(&input.comment)
            .fetch_one(pool)
            .await?;
        Ok(review)
    }

    /// Review history for a batch of students, keyed by reviewee uid,
    /// most recent first. Used to enrich applicant rosters.
    pub async fn list_by_reviewees(
        pool: &PgPool,
        uids: &[String],
    ) -> Result<HashMap<String, Vec<PeerReview>>, sqlx::Error> {
        if uids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM peer_reviews
             WHERE reviewee_id = ANY($1)
             ORDER BY created_at DESC"
        );
        let rows: Vec<PeerReview> = sqlx::query_as(&query).bind(uids).fetch_all(pool).await?;

        let mut map: HashMap<String, Vec<PeerReview>> = HashMap::new();
        for review in rows {
            map.entry(review.reviewee_id.clone()).or_default().push(review);
        }
        Ok(map)
    }
}
