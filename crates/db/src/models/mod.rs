//! Row models and DTOs for the data layer.

pub mod application;
pub mod peer_review;
pub mod project;
pub mod status;
pub mod student;
