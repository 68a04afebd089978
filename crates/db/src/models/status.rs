//! Lifecycle status enums, mapped to PostgreSQL enum types.

use serde::{Deserialize, Serialize};

/// Project lifecycle state. Transitions are leader-initiated only; no
/// ordering is enforced between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status")]
pub enum ProjectStatus {
    Recruiting,
    #[sqlx(rename = "In_Progress")]
    #[serde(rename = "In_Progress")]
    InProgress,
    Completed,
}

/// Application decision state. Defaults to Pending; the leader may move
/// an application between any of the three states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}
