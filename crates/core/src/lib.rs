//! Domain logic for the team-matching platform.
//!
//! Pure types and functions only: the error taxonomy, membership and
//! capacity accounting, and skill-name normalization. Anything touching
//! the database lives in `teammate-db`.

pub mod error;
pub mod membership;
pub mod skills;
pub mod types;
