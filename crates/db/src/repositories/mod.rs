//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or, for steps composed into a caller's
//! transaction, `&mut PgConnection`) as the first argument.

pub mod application_repo;
pub mod peer_review_repo;
pub mod project_repo;
pub mod skill_repo;
pub mod student_repo;

pub use application_repo::ApplicationRepo;
pub use peer_review_repo::PeerReviewRepo;
pub use project_repo::ProjectRepo;
pub use skill_repo::SkillRepo;
pub use student_repo::StudentRepo;
