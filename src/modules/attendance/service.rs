use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::{ClassId, SchoolId, StudentId};

use crate::modules::attendance::model::{
    AttendanceRecord, MarkAttendanceDto, MarkAttendanceResponse,
};

pub struct AttendanceService;

impl AttendanceService {
    /// Mark attendance for a class on one date.
    ///
    /// Students already marked for that date are skipped, so re-submitting
    /// the register never flips an earlier entry.
    #[instrument(skip(db, dto))]
    pub async fn mark_attendance(
        db: &PgPool,
        school_id: SchoolId,
        dto: MarkAttendanceDto,
    ) -> Result<MarkAttendanceResponse, AppError> {
        let class_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND school_id = $2)",
        )
        .bind(dto.class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        if !class_ok {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        let mut marked = 0;
        let mut skipped = 0;

        for entry in &dto.entries {
            let student_ok = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1 AND school_id = $2 AND class_id = $3)",
            )
            .bind(entry.student_id)
            .bind(school_id)
            .bind(dto.class_id)
            .fetch_one(db)
            .await?;
            if !student_ok {
                return Err(AppError::not_found(anyhow::anyhow!(
                    "Student not found in this class"
                )));
            }

            let result = sqlx::query(
                r#"INSERT INTO attendance (school_id, class_id, student_id, date, status)
                   VALUES ($1, $2, $3, $4, $5)
                   ON CONFLICT (student_id, date) DO NOTHING"#,
            )
            .bind(school_id)
            .bind(dto.class_id)
            .bind(entry.student_id)
            .bind(dto.date)
            .bind(entry.status)
            .execute(db)
            .await?;

            if result.rows_affected() == 1 {
                marked += 1;
            } else {
                skipped += 1;
            }
        }

        Ok(MarkAttendanceResponse { marked, skipped })
    }

    /// A student's full attendance history, newest first.
    #[instrument(skip(db))]
    pub async fn student_history(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let student_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1 AND school_id = $2)",
        )
        .bind(student_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;
        if !student_ok {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"SELECT id, school_id, class_id, student_id, date, status, created_at
               FROM attendance
               WHERE student_id = $1 AND school_id = $2
               ORDER BY date DESC"#,
        )
        .bind(student_id)
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(records)
    }

    /// Whether attendance has been taken for a class on the given date.
    #[instrument(skip(db))]
    pub async fn taken_on(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
        date: NaiveDate,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                SELECT 1 FROM attendance
                WHERE school_id = $1 AND class_id = $2 AND date = $3
            )"#,
        )
        .bind(school_id)
        .bind(class_id)
        .bind(date)
        .fetch_one(db)
        .await?;

        Ok(taken)
    }
}
