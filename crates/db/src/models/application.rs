//! Application entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teammate_core::types::{Date, DbId};

use crate::models::peer_review::PeerReview;
use crate::models::status::ApplicationStatus;

/// An application row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub application_id: DbId,
    pub project_id: DbId,
    pub applicant_id: String,
    pub applicant_date: Date,
    pub motivation: String,
    pub status: ApplicationStatus,
}

/// DTO for applying to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplication {
    pub project_id: DbId,
    pub applicant_id: String,
    pub applicant_date: Date,
    pub motivation: String,
}

/// A "my applications" item: the application joined with the project's
/// topic and leader identity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MyApplication {
    pub application_id: DbId,
    pub project_id: DbId,
    pub project_topic: String,
    pub project_leader_id: String,
    pub project_leader_name: String,
    pub applicant_date: Date,
    pub motivation: String,
    pub status: ApplicationStatus,
}

/// An applicant as seen by the project leader: the `project_applicants`
/// view row enriched with the applicant's skills and prior peer-review
/// history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectApplicant {
    pub leader_id: String,
    pub project_id: DbId,
    pub application_id: DbId,
    pub applicant_id: String,
    pub applicant_date: Date,
    pub applicant_name: String,
    pub applicant_email: Option<String>,
    pub applicant_profile_text: Option<String>,
    pub applicant_website_link: Option<String>,
    pub motivation: String,
    pub status: ApplicationStatus,
    #[sqlx(skip)]
    pub applicant_skills: Vec<String>,
    #[sqlx(skip)]
    pub applicant_reviews: Vec<PeerReview>,
}
