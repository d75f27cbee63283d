use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::{ExamId, SchoolId, StudentId};

use crate::modules::results::model::{ResultRecord, UploadResultsDto, UploadResultsResponse};

const RESULT_COLUMNS: &str = "id, exam_id, student_id, subject_marks, total_marks, created_at";

pub struct ResultService;

impl ResultService {
    async fn exam_in_school(
        db: &PgPool,
        school_id: SchoolId,
        exam_id: ExamId,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM exams WHERE id = $1 AND school_id = $2)",
        )
        .bind(exam_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Exam not found")));
        }

        Ok(())
    }

    /// Upload the result sheet for an exam, one entry per student.
    ///
    /// The whole sheet lands in a single transaction; if any entry fails,
    /// nothing is written. A second upload for the same exam is a conflict.
    #[instrument(skip(db, dto))]
    pub async fn upload_results(
        db: &PgPool,
        school_id: SchoolId,
        exam_id: ExamId,
        dto: UploadResultsDto,
    ) -> Result<UploadResultsResponse, AppError> {
        Self::exam_in_school(db, school_id, exam_id).await?;

        let already_uploaded = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM results WHERE exam_id = $1)",
        )
        .bind(exam_id)
        .fetch_one(db)
        .await?;

        if already_uploaded {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Results have already been uploaded for this exam"
            )));
        }

        let mut tx = db.begin().await?;

        for entry in &dto.entries {
            let student_ok = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1 AND school_id = $2)",
            )
            .bind(entry.student_id)
            .bind(school_id)
            .fetch_one(&mut *tx)
            .await?;
            if !student_ok {
                return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
            }

            let total_marks: i32 = entry.subject_marks.values().sum();
            let marks_json = serde_json::to_value(&entry.subject_marks)
                .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid marks payload: {}", e)))?;

            sqlx::query(
                r#"INSERT INTO results (exam_id, student_id, subject_marks, total_marks)
                   VALUES ($1, $2, $3, $4)"#,
            )
            .bind(exam_id)
            .bind(entry.student_id)
            .bind(&marks_json)
            .bind(total_marks)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow::anyhow!(
                        "Duplicate student entry in result sheet"
                    ));
                }
                AppError::from(e)
            })?;
        }

        tx.commit().await?;

        Ok(UploadResultsResponse {
            uploaded: dto.entries.len(),
        })
    }

    /// All results for an exam.
    #[instrument(skip(db))]
    pub async fn exam_results(
        db: &PgPool,
        school_id: SchoolId,
        exam_id: ExamId,
    ) -> Result<Vec<ResultRecord>, AppError> {
        Self::exam_in_school(db, school_id, exam_id).await?;

        let results = sqlx::query_as::<_, ResultRecord>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results WHERE exam_id = $1 ORDER BY total_marks DESC",
        ))
        .bind(exam_id)
        .fetch_all(db)
        .await?;

        Ok(results)
    }

    /// One student's result for an exam.
    #[instrument(skip(db))]
    pub async fn student_result(
        db: &PgPool,
        school_id: SchoolId,
        exam_id: ExamId,
        student_id: StudentId,
    ) -> Result<ResultRecord, AppError> {
        Self::exam_in_school(db, school_id, exam_id).await?;

        let result = sqlx::query_as::<_, ResultRecord>(&format!(
            "SELECT {RESULT_COLUMNS} FROM results WHERE exam_id = $1 AND student_id = $2",
        ))
        .bind(exam_id)
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Result not found")))?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    use crate::modules::results::model::ResultEntry;

    struct Seeded {
        school_id: SchoolId,
        exam_id: ExamId,
        students: Vec<StudentId>,
    }

    async fn seed(pool: &PgPool, prefix: &str, student_count: usize) -> Seeded {
        let school_id = sqlx::query_scalar::<_, SchoolId>(
            r#"INSERT INTO schools (name, owner_name, email, password)
               VALUES ('Test School', 'Owner', $1, 'not-a-real-hash')
               RETURNING id"#,
        )
        .bind(format!("{prefix}@test.edu"))
        .fetch_one(pool)
        .await
        .unwrap();

        let class_id = sqlx::query_scalar::<_, slateroom_models::ids::ClassId>(
            r#"INSERT INTO classes (school_id, class_text, class_num)
               VALUES ($1, 'Grade 5', 5) RETURNING id"#,
        )
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap();

        let subject_id = sqlx::query_scalar::<_, slateroom_models::ids::SubjectId>(
            r#"INSERT INTO subjects (school_id, subject_name, subject_code)
               VALUES ($1, 'Math', 'MATH-101') RETURNING id"#,
        )
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap();

        let exam_id = sqlx::query_scalar::<_, ExamId>(
            r#"INSERT INTO exams (school_id, class_id, subject_id, exam_type, exam_date)
               VALUES ($1, $2, $3, 'Midterm', $4) RETURNING id"#,
        )
        .bind(school_id)
        .bind(class_id)
        .bind(subject_id)
        .bind(Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap())
        .fetch_one(pool)
        .await
        .unwrap();

        let mut students = Vec::new();
        for i in 0..student_count {
            let id = sqlx::query_scalar::<_, StudentId>(
                r#"INSERT INTO students (school_id, class_id, name, email, age, gender, guardian, guardian_phone, password)
                   VALUES ($1, $2, 'S', $3, 10, 'Female', 'G', '555', 'hash')
                   RETURNING id"#,
            )
            .bind(school_id)
            .bind(class_id)
            .bind(format!("{prefix}-{i}@test.edu"))
            .fetch_one(pool)
            .await
            .unwrap();
            students.push(id);
        }

        Seeded {
            school_id,
            exam_id,
            students,
        }
    }

    fn entry(student_id: StudentId, math: i32, english: i32) -> ResultEntry {
        let mut marks = HashMap::new();
        marks.insert("Math".to_string(), math);
        marks.insert("English".to_string(), english);
        ResultEntry {
            student_id,
            subject_marks: marks,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_upload_computes_totals(pool: PgPool) {
        let seeded = seed(&pool, "r1", 1).await;

        ResultService::upload_results(
            &pool,
            seeded.school_id,
            seeded.exam_id,
            UploadResultsDto {
                entries: vec![entry(seeded.students[0], 80, 65)],
            },
        )
        .await
        .unwrap();

        let result = ResultService::student_result(
            &pool,
            seeded.school_id,
            seeded.exam_id,
            seeded.students[0],
        )
        .await
        .unwrap();

        assert_eq!(result.total_marks, 145);
        assert_eq!(result.subject_marks["Math"], 80);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_second_upload_conflicts(pool: PgPool) {
        let seeded = seed(&pool, "r2", 1).await;

        let dto = || UploadResultsDto {
            entries: vec![entry(seeded.students[0], 50, 50)],
        };

        ResultService::upload_results(&pool, seeded.school_id, seeded.exam_id, dto())
            .await
            .unwrap();

        let err = ResultService::upload_results(&pool, seeded.school_id, seeded.exam_id, dto())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_failed_upload_writes_nothing(pool: PgPool) {
        let seeded_a = seed(&pool, "r3a", 1).await;
        let seeded_b = seed(&pool, "r3b", 1).await;

        // Second entry belongs to another school; whole sheet is rejected
        let err = ResultService::upload_results(
            &pool,
            seeded_a.school_id,
            seeded_a.exam_id,
            UploadResultsDto {
                entries: vec![
                    entry(seeded_a.students[0], 70, 70),
                    entry(seeded_b.students[0], 60, 60),
                ],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let results = ResultService::exam_results(&pool, seeded_a.school_id, seeded_a.exam_id)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_student_result_not_found(pool: PgPool) {
        let seeded = seed(&pool, "r4", 1).await;

        let err = ResultService::student_result(
            &pool,
            seeded.school_id,
            seeded.exam_id,
            seeded.students[0],
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
