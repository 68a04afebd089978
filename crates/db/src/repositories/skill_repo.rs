//! Skill registry: canonical lowercase vocabulary plus the association
//! tables for students and projects.
//!
//! Association updates preserve the observable full-replace contract
//! but apply only the minimal diff against the current set.

use sqlx::{PgConnection, PgPool};
use teammate_core::skills::normalize;
use teammate_core::types::DbId;

/// Provides registry and association operations for skills.
pub struct SkillRepo;

impl SkillRepo {
    /// Insert any of `names` not already present. Names must be
    /// normalized by the caller. Concurrency-safe: a concurrent insert
    /// of the same name is absorbed by `ON CONFLICT DO NOTHING`.
    pub async fn ensure(conn: &mut PgConnection, names: &[String]) -> Result<(), sqlx::Error> {
        if names.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO skills (skill_name)
             SELECT unnest($1::text[])
             ON CONFLICT (skill_name) DO NOTHING",
        )
        .bind(names)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Skill names associated with a student.
    pub async fn list_for_student(pool: &PgPool, uid: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT s.skill_name FROM skills s
             JOIN student_skills ss ON s.skill_id = ss.skill_id
             WHERE ss.uid = $1
             ORDER BY s.skill_name",
        )
        .bind(uid)
        .fetch_all(pool)
        .await
    }

    /// Required-skill names for a project.
    pub async fn list_for_project(pool: &PgPool, project_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT s.skill_name FROM skills s
             JOIN project_required_skills prs ON s.skill_id = prs.skill_id
             WHERE prs.project_id = $1
             ORDER BY s.skill_name",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a student's skill associations with `names` (raw caller
    /// input; normalized here). Runs within the caller's transaction.
    ///
    /// Observably a full replace: omitted skills are removed. Internally
    /// a set reconciliation, so unchanged links are left untouched.
    pub async fn replace_student_skills(
        conn: &mut PgConnection,
        uid: &str,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        let target = normalize(names);
        Self::ensure(conn, &target).await?;

        let current: Vec<String> = sqlx::query_scalar(
            "SELECT s.skill_name FROM skills s
             JOIN student_skills ss ON s.skill_id = ss.skill_id
             WHERE ss.uid = $1",
        )
        .bind(uid)
        .fetch_all(&mut *conn)
        .await?;

        let to_remove: Vec<String> = current
            .iter()
            .filter(|name| !target.contains(name))
            .cloned()
            .collect();
        let to_add: Vec<String> = target
            .iter()
            .filter(|name| !current.contains(name))
            .cloned()
            .collect();

        if !to_remove.is_empty() {
            sqlx::query(
                "DELETE FROM student_skills
                 WHERE uid = $1
                   AND skill_id IN (SELECT skill_id FROM skills WHERE skill_name = ANY($2))",
            )
            .bind(uid)
            .bind(&to_remove)
            .execute(&mut *conn)
            .await?;
        }
        if !to_add.is_empty() {
            sqlx::query(
                "INSERT INTO student_skills (uid, skill_id)
                 SELECT $1, skill_id FROM skills WHERE skill_name = ANY($2)",
            )
            .bind(uid)
            .bind(&to_add)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Ensure and link required skills for a project. Runs within the
    /// caller's transaction; used during project creation.
    pub async fn link_project_skills(
        conn: &mut PgConnection,
        project_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        let target = normalize(names);
        if target.is_empty() {
            return Ok(());
        }
        Self::ensure(conn, &target).await?;
        sqlx::query(
            "INSERT INTO project_required_skills (project_id, skill_id)
             SELECT $1, skill_id FROM skills WHERE skill_name = ANY($2)",
        )
        .bind(project_id)
        .bind(&target)
        .execute(conn)
        .await?;
        Ok(())
    }
}
