//! Repository for the `applications` table: applying, the applicant's
//! own listing, and the leader-only roster and decision operations.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use teammate_core::error::CoreError;
use teammate_core::membership;
use teammate_core::types::DbId;

use crate::elevated::{begin_as_leader, elevated_error};
use crate::error::{is_unique_violation, StoreError};
use crate::models::application::{
    Application, CreateApplication, MyApplication, ProjectApplicant,
};
use crate::models::status::ApplicationStatus;
use crate::repositories::{PeerReviewRepo, ProjectRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "application_id, project_id, applicant_id, applicant_date, motivation, status";

/// Provides application operations.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Apply to a project. The row starts Pending.
    ///
    /// Self-applies are rejected, and a student may apply to a given
    /// project at most once: the pre-check reports the Conflict eagerly
    /// and the unique constraint closes the race window.
    pub async fn apply(pool: &PgPool, input: &CreateApplication) -> Result<Application, StoreError> {
        let leader = ProjectRepo::leader_of(pool, input.project_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", input.project_id))?;
        if leader == input.applicant_id {
            return Err(CoreError::InvalidOperation(
                "the project leader cannot apply to their own project".into(),
            )
            .into());
        }

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM applications WHERE project_id = $1 AND applicant_id = $2",
        )
        .bind(input.project_id)
        .bind(&input.applicant_id)
        .fetch_optional(pool)
        .await?;
        if existing.is_some() {
            return Err(CoreError::Conflict(
                "an application for this project already exists".into(),
            )
            .into());
        }

        let query = format!(
            "INSERT INTO applications (project_id, applicant_id, applicant_date, motivation)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(input.project_id)
            .bind(&input.applicant_id)
            .bind(input.applicant_date)
            .bind(&input.motivation)
            .fetch_one(pool)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, "uq_applications_project_applicant") {
                    CoreError::Conflict("an application for this project already exists".into())
                        .into()
                } else {
                    StoreError::Database(err)
                }
            })
    }

    /// All applications by a student, joined with project topic and
    /// leader identity, most recent first.
    pub async fn list_by_applicant(
        pool: &PgPool,
        applicant_id: &str,
    ) -> Result<Vec<MyApplication>, sqlx::Error> {
        sqlx::query_as::<_, MyApplication>(
            "SELECT a.application_id, a.project_id, p.topic AS project_topic,
                    s.uid AS project_leader_id, s.name AS project_leader_name,
                    a.applicant_date, a.motivation, a.status
             FROM applications a
             JOIN projects p ON a.project_id = p.project_id
             JOIN students s ON p.leader_id = s.uid
             WHERE a.applicant_id = $1
             ORDER BY a.applicant_date DESC",
        )
        .bind(applicant_id)
        .fetch_all(pool)
        .await
    }

    /// The applicant roster for a project, leader-only, most recent
    /// first. Reads the `project_applicants` view under the elevated
    /// leader role, then enriches each row with the applicant's skills
    /// and prior peer-review history.
    ///
    /// A project with no applications yields an empty list, distinct
    /// from the NotFound raised for an absent project.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        caller: &str,
    ) -> Result<Vec<ProjectApplicant>, StoreError> {
        ProjectRepo::require_leader(pool, project_id, caller).await?;

        let mut tx = begin_as_leader(pool).await?;
        let mut applicants: Vec<ProjectApplicant> = sqlx::query_as(
            "SELECT * FROM project_applicants WHERE project_id = $1 ORDER BY applicant_date DESC",
        )
        .bind(project_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(elevated_error)?;
        tx.commit().await.map_err(elevated_error)?;

        let uids: Vec<String> = applicants.iter().map(|a| a.applicant_id.clone()).collect();
        let skills = Self::skills_by_student(pool, &uids).await?;
        let reviews = PeerReviewRepo::list_by_reviewees(pool, &uids).await?;
        for applicant in &mut applicants {
            applicant.applicant_skills = skills
                .get(&applicant.applicant_id)
                .cloned()
                .unwrap_or_default();
            applicant.applicant_reviews = reviews
                .get(&applicant.applicant_id)
                .cloned()
                .unwrap_or_default();
        }
        Ok(applicants)
    }

    /// Decide an application: set its status, leader-only, under the
    /// elevated role. Transitions between the three states are
    /// unrestricted, except that accepting is refused once the project
    /// is full (leader + accepted applicants = capacity).
    pub async fn update_status(
        pool: &PgPool,
        project_id: DbId,
        applicant_id: &str,
        new_status: ApplicationStatus,
        caller: &str,
    ) -> Result<(), StoreError> {
        ProjectRepo::require_leader(pool, project_id, caller).await?;

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM applications WHERE project_id = $1 AND applicant_id = $2",
        )
        .bind(project_id)
        .bind(applicant_id)
        .fetch_optional(pool)
        .await?;
        if existing.is_none() {
            return Err(CoreError::InvalidOperation(format!(
                "no application by '{applicant_id}' for project {project_id}"
            ))
            .into());
        }

        let mut tx = begin_as_leader(pool).await?;
        if new_status == ApplicationStatus::Accepted {
            Self::check_capacity(&mut tx, project_id, applicant_id).await?;
        }
        let result = sqlx::query(
            "UPDATE applications SET status = $3 WHERE project_id = $1 AND applicant_id = $2",
        )
        .bind(project_id)
        .bind(applicant_id)
        .bind(new_status)
        .execute(&mut *tx)
        .await
        .map_err(elevated_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::InvalidOperation(
                "application status update affected no rows".into(),
            )
            .into());
        }
        tx.commit().await.map_err(elevated_error)?;
        tracing::info!(project_id, applicant_id, status = ?new_status, "application status updated");
        Ok(())
    }

    /// Refuse acceptance when it would push the member count past the
    /// project's capacity. Runs inside the elevated transaction that
    /// performs the UPDATE and takes a row lock on the project, so the
    /// count and the mutation see one snapshot and concurrent decisions
    /// on the same project serialize. The target applicant is excluded
    /// so re-accepting is a no-op, not an error.
    async fn check_capacity(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        applicant_id: &str,
    ) -> Result<(), StoreError> {
        let (capacity, accepted_others): (i32, i64) = sqlx::query_as(
            "SELECT p.capacity,
                    (SELECT COUNT(*) FROM applications
                     WHERE project_id = p.project_id AND status = 'Accepted'
                       AND applicant_id <> $2) AS accepted_others
             FROM projects p WHERE p.project_id = $1
             FOR UPDATE OF p",
        )
        .bind(project_id)
        .bind(applicant_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(elevated_error)?;

        if !membership::acceptance_within_capacity(accepted_others, capacity) {
            return Err(CoreError::InvalidOperation(format!(
                "project {project_id} is already at capacity ({capacity})"
            ))
            .into());
        }
        Ok(())
    }

    /// Skill names for a batch of students, keyed by uid.
    async fn skills_by_student(
        pool: &PgPool,
        uids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, sqlx::Error> {
        if uids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT ss.uid, s.skill_name
             FROM student_skills ss
             JOIN skills s ON s.skill_id = ss.skill_id
             WHERE ss.uid = ANY($1)
             ORDER BY s.skill_name",
        )
        .bind(uids)
        .fetch_all(pool)
        .await?;

        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (uid, name) in rows {
            map.entry(uid).or_default().push(name);
        }
        Ok(map)
    }
}
