use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::{ClassId, ExamId, SchoolId, SubjectId};

use crate::modules::examinations::model::{CreateExamDto, Exam, ExamWithNames, UpdateExamDto};

const EXAM_COLUMNS: &str =
    "id, school_id, class_id, subject_id, exam_type, exam_date, created_at";

const EXAM_WITH_NAMES: &str = r#"SELECT
        e.id, e.school_id, e.class_id, e.subject_id, e.exam_type,
        su.subject_name,
        c.class_text,
        e.exam_date, e.created_at
       FROM exams e
       JOIN subjects su ON su.id = e.subject_id
       JOIN classes c ON c.id = e.class_id"#;

pub struct ExamService;

impl ExamService {
    async fn validate_references(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
        subject_id: SubjectId,
    ) -> Result<(), AppError> {
        let class_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND school_id = $2)",
        )
        .bind(class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        if !class_ok {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        let subject_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = $1 AND school_id = $2)",
        )
        .bind(subject_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        if !subject_ok {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn create_exam(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateExamDto,
    ) -> Result<Exam, AppError> {
        Self::validate_references(db, school_id, dto.class_id, dto.subject_id).await?;

        let exam = sqlx::query_as::<_, Exam>(&format!(
            r#"INSERT INTO exams (school_id, class_id, subject_id, exam_type, exam_date)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {EXAM_COLUMNS}"#,
        ))
        .bind(school_id)
        .bind(dto.class_id)
        .bind(dto.subject_id)
        .bind(&dto.exam_type)
        .bind(dto.exam_date)
        .fetch_one(db)
        .await?;

        Ok(exam)
    }

    #[instrument(skip(db))]
    pub async fn list_exams(
        db: &PgPool,
        school_id: SchoolId,
    ) -> Result<Vec<ExamWithNames>, AppError> {
        let exams = sqlx::query_as::<_, ExamWithNames>(&format!(
            "{EXAM_WITH_NAMES} WHERE e.school_id = $1 ORDER BY e.exam_date ASC",
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(exams)
    }

    #[instrument(skip(db))]
    pub async fn list_by_class(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
    ) -> Result<Vec<ExamWithNames>, AppError> {
        let exams = sqlx::query_as::<_, ExamWithNames>(&format!(
            "{EXAM_WITH_NAMES} WHERE e.school_id = $1 AND e.class_id = $2 ORDER BY e.exam_date ASC",
        ))
        .bind(school_id)
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(exams)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_exam(
        db: &PgPool,
        school_id: SchoolId,
        exam_id: ExamId,
        dto: UpdateExamDto,
    ) -> Result<Exam, AppError> {
        let existing = sqlx::query_as::<_, Exam>(&format!(
            "SELECT {EXAM_COLUMNS} FROM exams WHERE id = $1 AND school_id = $2",
        ))
        .bind(exam_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam not found")))?;

        let subject_id = dto.subject_id.unwrap_or(existing.subject_id);
        let exam_type = dto.exam_type.unwrap_or(existing.exam_type);
        let exam_date = dto.exam_date.unwrap_or(existing.exam_date);

        Self::validate_references(db, school_id, existing.class_id, subject_id).await?;

        let exam = sqlx::query_as::<_, Exam>(&format!(
            r#"UPDATE exams
               SET subject_id = $1, exam_type = $2, exam_date = $3
               WHERE id = $4 AND school_id = $5
               RETURNING {EXAM_COLUMNS}"#,
        ))
        .bind(subject_id)
        .bind(&exam_type)
        .bind(exam_date)
        .bind(exam_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(exam)
    }

    /// Delete an exam. Uploaded results go with it.
    #[instrument(skip(db))]
    pub async fn delete_exam(
        db: &PgPool,
        school_id: SchoolId,
        exam_id: ExamId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1 AND school_id = $2")
            .bind(exam_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Exam not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::TimeZone;
    use chrono::Utc;

    struct Seeded {
        school_id: SchoolId,
        class_id: ClassId,
        subject_id: SubjectId,
    }

    async fn seed(pool: &PgPool, prefix: &str) -> Seeded {
        let school_id = sqlx::query_scalar::<_, SchoolId>(
            r#"INSERT INTO schools (name, owner_name, email, password)
               VALUES ('Test School', 'Owner', $1, 'not-a-real-hash')
               RETURNING id"#,
        )
        .bind(format!("{prefix}@test.edu"))
        .fetch_one(pool)
        .await
        .unwrap();

        let class_id = sqlx::query_scalar::<_, ClassId>(
            r#"INSERT INTO classes (school_id, class_text, class_num)
               VALUES ($1, 'Grade 5', 5) RETURNING id"#,
        )
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap();

        let subject_id = sqlx::query_scalar::<_, SubjectId>(
            r#"INSERT INTO subjects (school_id, subject_name, subject_code)
               VALUES ($1, 'Math', 'MATH-101') RETURNING id"#,
        )
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap();

        Seeded {
            school_id,
            class_id,
            subject_id,
        }
    }

    fn exam_dto(seeded: &Seeded) -> CreateExamDto {
        CreateExamDto {
            class_id: seeded.class_id,
            subject_id: seeded.subject_id,
            exam_type: "Midterm".to_string(),
            exam_date: Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_list_by_class(pool: PgPool) {
        let seeded = seed(&pool, "e1").await;

        ExamService::create_exam(&pool, seeded.school_id, exam_dto(&seeded))
            .await
            .unwrap();

        let exams = ExamService::list_by_class(&pool, seeded.school_id, seeded.class_id)
            .await
            .unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].subject_name, "Math");
        assert_eq!(exams[0].exam_type, "Midterm");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_with_foreign_subject_not_found(pool: PgPool) {
        let seeded_a = seed(&pool, "e2a").await;
        let seeded_b = seed(&pool, "e2b").await;

        let err = ExamService::create_exam(
            &pool,
            seeded_a.school_id,
            CreateExamDto {
                class_id: seeded_a.class_id,
                subject_id: seeded_b.subject_id,
                exam_type: "Final".to_string(),
                exam_date: Utc.with_ymd_and_hms(2026, 12, 1, 9, 0, 0).unwrap(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_exam(pool: PgPool) {
        let seeded = seed(&pool, "e3").await;
        let exam = ExamService::create_exam(&pool, seeded.school_id, exam_dto(&seeded))
            .await
            .unwrap();

        let updated = ExamService::update_exam(
            &pool,
            seeded.school_id,
            exam.id,
            UpdateExamDto {
                subject_id: None,
                exam_type: Some("Final".to_string()),
                exam_date: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.exam_type, "Final");
        assert_eq!(updated.exam_date, exam.exam_date);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_exam_cross_tenant_not_found(pool: PgPool) {
        let seeded_a = seed(&pool, "e4a").await;
        let seeded_b = seed(&pool, "e4b").await;

        let exam = ExamService::create_exam(&pool, seeded_a.school_id, exam_dto(&seeded_a))
            .await
            .unwrap();

        let err = ExamService::delete_exam(&pool, seeded_b.school_id, exam.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
