//! Repository for the `projects` table: creation with required skills,
//! filtered listings, detail assembly, and the leader-only status and
//! deletion operations.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use teammate_core::error::CoreError;
use teammate_core::types::{Date, DbId};
use teammate_core::membership;

use crate::elevated::{begin_as_leader, elevated_error};
use crate::error::StoreError;
use crate::models::project::{
    CreateProject, GroupBy, MyProject, OrderBy, ProjectDetails, ProjectFilter, ProjectMember,
    ProjectSummary,
};
use crate::models::status::ProjectStatus;
use crate::repositories::SkillRepo;

/// Columns exposed by the listing views and the joined base query.
const LIST_COLUMNS: &str =
    "project_id, leader_id, topic, description1, capacity, deadline, status, leader_name";

/// Provides lifecycle operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Create a project with its required skills, as one transaction.
    ///
    /// The project starts Recruiting. Skill names are normalized,
    /// registered idempotently, and linked; any failure rolls the whole
    /// operation back.
    pub async fn create_with_skills(
        pool: &PgPool,
        input: &CreateProject,
    ) -> Result<DbId, StoreError> {
        let mut tx = pool.begin().await?;

        let project_id: DbId = sqlx::query_scalar(
            "INSERT INTO projects (leader_id, topic, description1, description2, capacity, deadline)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING project_id",
        )
        .bind(&input.leader_id)
        .bind(&input.topic)
        .bind(&input.description1)
        .bind(&input.description2)
        .bind(input.capacity)
        .bind(input.deadline)
        .fetch_one(&mut *tx)
        .await?;

        SkillRepo::link_project_skills(&mut *tx, project_id, &input.skills).await?;

        tx.commit().await?;
        tracing::info!(project_id, leader_id = %input.leader_id, "project created");
        Ok(project_id)
    }

    /// List projects filtered by status group, matched against
    /// topic/description1 when `search` is non-empty, ordered by
    /// deadline ascending or capacity descending (deadline as tiebreak).
    ///
    /// `GroupBy::All` hides expired-unfilled Recruiting projects; the
    /// status-specific groups read their filtered views. Each item
    /// carries its required skills and derived members_count.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let source = match filter.group_by {
            GroupBy::Recruiting => format!("SELECT {LIST_COLUMNS} FROM recruiting_projects"),
            GroupBy::InProgress => format!("SELECT {LIST_COLUMNS} FROM in_progress_projects"),
            GroupBy::Completed => format!("SELECT {LIST_COLUMNS} FROM completed_projects"),
            GroupBy::All => format!(
                "SELECT p.project_id, p.leader_id, p.topic, p.description1, p.capacity,
                        p.deadline, p.status, s.name AS leader_name
                 FROM projects p
                 JOIN students s ON p.leader_id = s.uid
                 WHERE NOT (p.status = 'Recruiting' AND p.deadline < CURRENT_DATE)"
            ),
        };

        let search = filter.search.trim();
        let where_sql = if search.is_empty() {
            String::new()
        } else if filter.group_by == GroupBy::All {
            " AND (topic ILIKE $1 OR description1 ILIKE $1)".to_string()
        } else {
            " WHERE topic ILIKE $1 OR description1 ILIKE $1".to_string()
        };

        let order_sql = match filter.order_by {
            OrderBy::Deadline => " ORDER BY deadline ASC",
            OrderBy::Capacity => " ORDER BY capacity DESC, deadline ASC",
        };

        let sql = format!("{source}{where_sql}{order_sql}");
        let mut projects: Vec<ProjectSummary> = if search.is_empty() {
            sqlx::query_as(&sql).fetch_all(pool).await?
        } else {
            sqlx::query_as(&sql)
                .bind(format!("%{search}%"))
                .fetch_all(pool)
                .await?
        };

        let ids: Vec<DbId> = projects.iter().map(|p| p.project_id).collect();
        let skills = Self::skills_by_project(pool, &ids).await?;
        let counts = Self::members_count_by_project(pool, &ids).await?;
        for project in &mut projects {
            project.skills = skills.get(&project.project_id).cloned().unwrap_or_default();
            project.members_count = counts.get(&project.project_id).copied().unwrap_or(1);
        }
        Ok(projects)
    }

    /// Full detail view: project + leader name, required skills, member
    /// list (leader and accepted applicants, ordered by name, each with
    /// their own skills), derived members_count, and whether the viewer
    /// may apply. Returns `None` when the project does not exist.
    pub async fn details(
        pool: &PgPool,
        project_id: DbId,
        viewer: Option<&str>,
    ) -> Result<Option<ProjectDetails>, sqlx::Error> {
        #[derive(FromRow)]
        struct DetailRow {
            project_id: DbId,
            leader_id: String,
            leader_name: String,
            topic: String,
            description1: String,
            description2: String,
            capacity: i32,
            deadline: Date,
            status: ProjectStatus,
        }

        let Some(row) = sqlx::query_as::<_, DetailRow>(
            "SELECT p.project_id, p.leader_id, s.name AS leader_name, p.topic,
                    p.description1, p.description2, p.capacity, p.deadline, p.status
             FROM projects p
             JOIN students s ON p.leader_id = s.uid
             WHERE p.project_id = $1",
        )
        .bind(project_id)
        .fetch_optional(pool)
        .await?
        else {
            return Ok(None);
        };

        let skills = SkillRepo::list_for_project(pool, project_id).await?;

        let has_application = match viewer {
            Some(uid) => Self::has_application(pool, project_id, uid).await?,
            None => false,
        };
        let can_apply = membership::can_apply(viewer, &row.leader_id, has_application);

        let members = Self::members(pool, project_id).await?;
        let accepted: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT applicant_id) FROM applications
             WHERE project_id = $1 AND status = 'Accepted'",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;

        Ok(Some(ProjectDetails {
            project_id: row.project_id,
            leader_id: row.leader_id,
            leader_name: row.leader_name,
            topic: row.topic,
            description1: row.description1,
            description2: row.description2,
            capacity: row.capacity,
            deadline: row.deadline,
            status: row.status,
            skills,
            can_apply,
            members,
            members_count: membership::members_count(accepted),
        }))
    }

    /// Projects where the student is leader or an accepted applicant,
    /// excluding expired-unfilled Recruiting projects, deadline
    /// ascending, each with derived members_count.
    pub async fn list_mine(pool: &PgPool, uid: &str) -> Result<Vec<MyProject>, sqlx::Error> {
        sqlx::query_as::<_, MyProject>(
            "SELECT p.project_id, p.leader_id, p.topic AS title, p.status, p.capacity, p.deadline,
                    (SELECT COUNT(DISTINCT member_uid) FROM (
                         SELECT applicant_id AS member_uid FROM applications
                         WHERE project_id = p.project_id AND status = 'Accepted'
                         UNION
                         SELECT leader_id FROM projects WHERE project_id = p.project_id
                     ) members) AS members_count
             FROM projects p
             WHERE (p.leader_id = $1
                    OR p.project_id IN (SELECT project_id FROM applications
                                        WHERE applicant_id = $1 AND status = 'Accepted'))
               AND NOT (p.status = 'Recruiting' AND p.deadline < CURRENT_DATE)
             ORDER BY p.deadline ASC",
        )
        .bind(uid)
        .fetch_all(pool)
        .await
    }

    /// Leader uid of a project, or `None` when the project is absent.
    pub async fn leader_of(pool: &PgPool, project_id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT leader_id FROM projects WHERE project_id = $1")
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Transition a project's status. Leader-only; the UPDATE itself
    /// runs under the elevated leader role. Any transition between
    /// states is allowed.
    pub async fn update_status(
        pool: &PgPool,
        project_id: DbId,
        caller: &str,
        new_status: ProjectStatus,
    ) -> Result<(), StoreError> {
        Self::require_leader(pool, project_id, caller).await?;

        let mut tx = begin_as_leader(pool).await?;
        let result = sqlx::query(
            "UPDATE projects SET status = $2, updated_at = NOW() WHERE project_id = $1",
        )
        .bind(project_id)
        .bind(new_status)
        .execute(&mut *tx)
        .await
        .map_err(elevated_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::InvalidOperation(
                "project status update affected no rows".into(),
            )
            .into());
        }
        tx.commit().await.map_err(elevated_error)?;
        tracing::info!(project_id, status = ?new_status, "project status updated");
        Ok(())
    }

    /// Delete a project with its applications and required-skill links,
    /// atomically, under the elevated leader role. Leader-only, and
    /// refused once any applicant has been accepted. The accepted-member
    /// check runs inside the same transaction as the deletes, behind a
    /// row lock on the project, so an acceptance racing the delete
    /// cannot slip between check and mutation.
    pub async fn delete(pool: &PgPool, project_id: DbId, caller: &str) -> Result<(), StoreError> {
        Self::require_leader(pool, project_id, caller).await?;

        let mut tx = begin_as_leader(pool).await?;
        let accepted: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM applications
                     WHERE project_id = p.project_id AND status = 'Accepted')
             FROM projects p WHERE p.project_id = $1
             FOR UPDATE OF p",
        )
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(elevated_error)?;
        if accepted > 0 {
            return Err(CoreError::InvalidOperation(
                "project has accepted applicants and cannot be deleted".into(),
            )
            .into());
        }

        sqlx::query("DELETE FROM applications WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await
            .map_err(elevated_error)?;
        sqlx::query("DELETE FROM project_required_skills WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await
            .map_err(elevated_error)?;
        let result = sqlx::query("DELETE FROM projects WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await
            .map_err(elevated_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::InvalidOperation("project delete affected no rows".into()).into());
        }
        tx.commit().await.map_err(elevated_error)?;
        tracing::info!(project_id, "project deleted");
        Ok(())
    }

    /// NotFound if the project is absent, PermissionDenied unless the
    /// caller is its leader.
    pub(crate) async fn require_leader(
        pool: &PgPool,
        project_id: DbId,
        caller: &str,
    ) -> Result<(), StoreError> {
        let leader = Self::leader_of(pool, project_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", project_id))?;
        if leader != caller {
            return Err(CoreError::PermissionDenied(
                "only the project leader may perform this action".into(),
            )
            .into());
        }
        Ok(())
    }

    /// Whether the student has any application row for the project,
    /// whatever its status.
    async fn has_application(pool: &PgPool, project_id: DbId, uid: &str) -> Result<bool, sqlx::Error> {
        let row: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM applications WHERE project_id = $1 AND applicant_id = $2",
        )
        .bind(project_id)
        .bind(uid)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Current members (leader plus accepted applicants) with their own
    /// skill sets, ordered by name.
    async fn members(pool: &PgPool, project_id: DbId) -> Result<Vec<ProjectMember>, sqlx::Error> {
        let rows: Vec<(String, String, Vec<String>)> = sqlx::query_as(
            "SELECT s.uid, s.name,
                    COALESCE(array_agg(sk.skill_name ORDER BY sk.skill_name)
                             FILTER (WHERE sk.skill_name IS NOT NULL), ARRAY[]::text[]) AS skills
             FROM students s
             LEFT JOIN student_skills ss ON ss.uid = s.uid
             LEFT JOIN skills sk ON sk.skill_id = ss.skill_id
             WHERE s.uid IN (
                 SELECT applicant_id FROM applications
                 WHERE project_id = $1 AND status = 'Accepted'
                 UNION
                 SELECT leader_id FROM projects WHERE project_id = $1
             )
             GROUP BY s.uid, s.name
             ORDER BY s.name",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(uid, name, skills)| ProjectMember { uid, name, skills })
            .collect())
    }

    /// Required skills for a batch of projects, keyed by project id.
    async fn skills_by_project(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<String>>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(DbId, String)> = sqlx::query_as(
            "SELECT prs.project_id, s.skill_name
             FROM project_required_skills prs
             JOIN skills s ON s.skill_id = prs.skill_id
             WHERE prs.project_id = ANY($1)
             ORDER BY s.skill_name",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        let mut map: HashMap<DbId, Vec<String>> = HashMap::new();
        for (project_id, name) in rows {
            map.entry(project_id).or_default().push(name);
        }
        Ok(map)
    }

    /// Derived member counts for a batch of projects: the leader plus
    /// every distinct accepted applicant. Same definition as the detail
    /// and "my projects" views.
    async fn members_count_by_project(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, i64>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(DbId, i64)> = sqlx::query_as(
            "SELECT m.project_id, COUNT(DISTINCT m.member_uid)
             FROM (
                 SELECT project_id, applicant_id AS member_uid FROM applications
                 WHERE project_id = ANY($1) AND status = 'Accepted'
                 UNION
                 SELECT project_id, leader_id FROM projects WHERE project_id = ANY($1)
             ) m
             GROUP BY m.project_id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
