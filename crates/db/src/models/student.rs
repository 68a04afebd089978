//! Student entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teammate_core::types::Timestamp;

/// A student row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub uid: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub email: Option<String>,
    pub profile_text: Option<String>,
    pub website_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a student at signup.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub uid: String,
    pub name: String,
    pub hashed_password: String,
}

/// DTO for a wholesale profile update. The skill set replaces the
/// existing associations; omitted skills are removed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub name: String,
    pub email: Option<String>,
    pub profile_text: Option<String>,
    pub website_link: Option<String>,
    pub skills: Vec<String>,
}

/// Profile fields plus the associated skill set, as returned to viewers.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub profile_text: Option<String>,
    pub website_link: Option<String>,
    pub skills: Vec<String>,
}
