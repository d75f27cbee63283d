use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::{SchoolId, SubjectId};

use crate::modules::subjects::model::{CreateSubjectDto, Subject};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, dto))]
    pub async fn create_subject(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (school_id, subject_name, subject_code)
               VALUES ($1, $2, $3)
               RETURNING id, school_id, subject_name, subject_code, created_at"#,
        )
        .bind(school_id)
        .bind(&dto.subject_name)
        .bind(&dto.subject_code)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A subject with this code already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn list_subjects(db: &PgPool, school_id: SchoolId) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT id, school_id, subject_name, subject_code, created_at
               FROM subjects WHERE school_id = $1
               ORDER BY subject_name ASC"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    /// Delete a subject. Rejected while exams or schedules still reference it.
    #[instrument(skip(db))]
    pub async fn delete_subject(
        db: &PgPool,
        school_id: SchoolId,
        subject_id: SubjectId,
    ) -> Result<(), AppError> {
        let in_use = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM exams WHERE subject_id = $1)
               OR EXISTS(SELECT 1 FROM schedules WHERE subject_id = $1)"#,
        )
        .bind(subject_id)
        .fetch_one(db)
        .await?;

        if in_use {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Subject has exams or schedules and cannot be deleted"
            )));
        }

        let result = sqlx::query("DELETE FROM subjects WHERE id = $1 AND school_id = $2")
            .bind(subject_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }

        Ok(())
    }
}
