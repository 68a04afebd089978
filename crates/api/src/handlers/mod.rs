//! HTTP handlers, one module per resource.

pub mod application;
pub mod auth;
pub mod profile;
pub mod project;
pub mod review;

use serde::Deserialize;

/// Query parameter carrying the caller's authenticated uid.
///
/// Identity is explicit by design: callers pass the uid they
/// authenticated as, and the engine authorizes by comparing it against
/// the project's leader.
#[derive(Debug, Deserialize)]
pub struct CallerQuery {
    pub current_user_id: String,
}
