//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teammate_core::types::{Date, DbId};

use crate::models::status::ProjectStatus;

/// DTO for creating a project. The creator becomes the leader and the
/// project starts Recruiting.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub leader_id: String,
    pub topic: String,
    pub description1: String,
    pub description2: String,
    pub capacity: i32,
    pub deadline: Date,
    pub skills: Vec<String>,
}

/// Sort order for project listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Deadline,
    Capacity,
}

/// Status filter for project listings. `All` excludes expired-unfilled
/// Recruiting projects rather than showing stale listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum GroupBy {
    #[default]
    All,
    Recruiting,
    #[serde(rename = "In_Progress")]
    InProgress,
    Completed,
}

/// Filter parameters for [`crate::repositories::ProjectRepo::list`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    #[serde(default)]
    pub order_by: OrderBy,
    #[serde(default)]
    pub group_by: GroupBy,
    #[serde(default)]
    pub search: String,
}

/// A listing item: the project joined with its leader's name, plus the
/// required skills and derived member count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub project_id: DbId,
    pub leader_id: String,
    pub topic: String,
    pub description1: String,
    pub capacity: i32,
    pub deadline: Date,
    pub status: ProjectStatus,
    pub leader_name: String,
    #[sqlx(skip)]
    pub skills: Vec<String>,
    #[sqlx(skip)]
    pub members_count: i64,
}

/// A current member of a project (the leader or an accepted applicant)
/// with their own skill set.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectMember {
    pub uid: String,
    pub name: String,
    pub skills: Vec<String>,
}

/// Full detail view of a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetails {
    pub project_id: DbId,
    pub leader_id: String,
    pub leader_name: String,
    pub topic: String,
    pub description1: String,
    pub description2: String,
    pub capacity: i32,
    pub deadline: Date,
    pub status: ProjectStatus,
    pub skills: Vec<String>,
    pub can_apply: bool,
    pub members: Vec<ProjectMember>,
    pub members_count: i64,
}

/// A "my projects" item: a project the student leads or was accepted
/// into, with the derived member count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MyProject {
    pub project_id: DbId,
    pub leader_id: String,
    pub title: String,
    pub status: ProjectStatus,
    pub capacity: i32,
    pub deadline: Date,
    pub members_count: i64,
}
