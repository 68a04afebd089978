//! Repository for the `students` table and profile assembly.

use sqlx::PgPool;
use teammate_core::error::CoreError;

use crate::error::StoreError;
use crate::models::student::{CreateStudent, Student, StudentProfile, UpdateProfile};
use crate::repositories::SkillRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "uid, name, hashed_password, email, profile_text, website_link, created_at, updated_at";

/// Provides signup, lookup, and profile operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Whether a student with the given uid exists.
    pub async fn exists(pool: &PgPool, uid: &str) -> Result<bool, sqlx::Error> {
        let row: Option<i32> = sqlx::query_scalar("SELECT 1 FROM students WHERE uid = $1")
            .bind(uid)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Insert a new student at signup. A taken uid is a Conflict, both
    /// via the explicit check and via the primary-key constraint.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, StoreError> {
        if Self::exists(pool, &input.uid).await? {
            return Err(CoreError::Conflict(format!("uid '{}' is already taken", input.uid)).into());
        }
        let query = format!(
            "INSERT INTO students (uid, name, hashed_password)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.uid)
            .bind(&input.name)
            .bind(&input.hashed_password)
            .fetch_one(pool)
            .await
            .map_err(|err| match &err {
                sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                    CoreError::Conflict(format!("uid '{}' is already taken", input.uid)).into()
                }
                _ => StoreError::Database(err),
            })
    }

    /// Find a student by uid.
    pub async fn find_by_uid(pool: &PgPool, uid: &str) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE uid = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(uid)
            .fetch_optional(pool)
            .await
    }

    /// Profile fields plus the associated skill set.
    pub async fn get_profile(
        pool: &PgPool,
        uid: &str,
    ) -> Result<Option<StudentProfile>, sqlx::Error> {
        let Some(student) = Self::find_by_uid(pool, uid).await? else {
            return Ok(None);
        };
        let skills = SkillRepo::list_for_student(pool, uid).await?;
        Ok(Some(StudentProfile {
            uid: student.uid,
            name: student.name,
            email: student.email,
            profile_text: student.profile_text,
            website_link: student.website_link,
            skills,
        }))
    }

    /// Update profile fields and replace the skill associations, as one
    /// transaction. The skill set is a full replace: omitted skills are
    /// removed.
    pub async fn update_profile(
        pool: &PgPool,
        uid: &str,
        input: &UpdateProfile,
    ) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE students
             SET name = $2, email = $3, profile_text = $4, website_link = $5,
                 updated_at = NOW()
             WHERE uid = $1",
        )
        .bind(uid)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.profile_text)
        .bind(&input.website_link)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Student", uid).into());
        }

        SkillRepo::replace_student_skills(&mut *tx, uid, &input.skills).await?;

        tx.commit().await?;
        Ok(())
    }
}
