use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::{AssignmentId, ClassId, SchoolId, StudentId};

use crate::modules::assignments::model::{Assignment, AssignmentWithClass, CreateAssignmentDto};

const ASSIGNMENT_COLUMNS: &str =
    "id, school_id, class_id, title, deadline, file_url, created_at";

const ASSIGNMENT_WITH_CLASS: &str = r#"SELECT
        a.id, a.school_id, a.class_id,
        c.class_text,
        a.title, a.deadline, a.file_url, a.created_at
       FROM assignments a
       JOIN classes c ON c.id = a.class_id"#;

pub struct AssignmentService;

impl AssignmentService {
    #[instrument(skip(db, dto))]
    pub async fn create_assignment(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateAssignmentDto,
    ) -> Result<Assignment, AppError> {
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

        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            r#"INSERT INTO assignments (school_id, class_id, title, deadline, file_url)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {ASSIGNMENT_COLUMNS}"#,
        ))
        .bind(school_id)
        .bind(dto.class_id)
        .bind(&dto.title)
        .bind(dto.deadline)
        .bind(&dto.file_url)
        .fetch_one(db)
        .await?;

        Ok(assignment)
    }

    #[instrument(skip(db))]
    pub async fn list_assignments(
        db: &PgPool,
        school_id: SchoolId,
    ) -> Result<Vec<AssignmentWithClass>, AppError> {
        let assignments = sqlx::query_as::<_, AssignmentWithClass>(&format!(
            "{ASSIGNMENT_WITH_CLASS} WHERE a.school_id = $1 ORDER BY a.deadline ASC",
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(assignments)
    }

    /// Open assignments for the student's own class, soonest deadline first.
    #[instrument(skip(db))]
    pub async fn list_for_student(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
    ) -> Result<Vec<Assignment>, AppError> {
        let class_id = sqlx::query_scalar::<_, ClassId>(
            "SELECT class_id FROM students WHERE id = $1 AND school_id = $2",
        )
        .bind(student_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        let assignments = sqlx::query_as::<_, Assignment>(&format!(
            r#"SELECT {ASSIGNMENT_COLUMNS} FROM assignments
               WHERE school_id = $1 AND class_id = $2 AND deadline >= NOW()
               ORDER BY deadline ASC"#,
        ))
        .bind(school_id)
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(assignments)
    }

    #[instrument(skip(db))]
    pub async fn delete_assignment(
        db: &PgPool,
        school_id: SchoolId,
        assignment_id: AssignmentId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1 AND school_id = $2")
            .bind(assignment_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Assignment not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};

    struct Seeded {
        school_id: SchoolId,
        class_id: ClassId,
        student_id: StudentId,
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

        let student_id = sqlx::query_scalar::<_, StudentId>(
            r#"INSERT INTO students (school_id, class_id, name, email, age, gender, guardian, guardian_phone, password)
               VALUES ($1, $2, 'Student', $3, 11, 'Female', 'Guardian', '555-0100', 'not-a-real-hash')
               RETURNING id"#,
        )
        .bind(school_id)
        .bind(class_id)
        .bind(format!("{prefix}.student@test.edu"))
        .fetch_one(pool)
        .await
        .unwrap();

        Seeded {
            school_id,
            class_id,
            student_id,
        }
    }

    fn assignment_dto(class_id: ClassId, title: &str, days_ahead: i64) -> CreateAssignmentDto {
        CreateAssignmentDto {
            class_id,
            title: title.to_string(),
            deadline: Utc::now() + Duration::days(days_ahead),
            file_url: "https://files.test.edu/worksheet.pdf".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_student_sees_only_open_own_class(pool: PgPool) {
        let seeded = seed(&pool, "a1").await;

        let other_class = sqlx::query_scalar::<_, ClassId>(
            r#"INSERT INTO classes (school_id, class_text, class_num)
               VALUES ($1, 'Grade 6', 6) RETURNING id"#,
        )
        .bind(seeded.school_id)
        .fetch_one(&pool)
        .await
        .unwrap();

        AssignmentService::create_assignment(
            &pool,
            seeded.school_id,
            assignment_dto(seeded.class_id, "Open", 3),
        )
        .await
        .unwrap();
        AssignmentService::create_assignment(
            &pool,
            seeded.school_id,
            assignment_dto(seeded.class_id, "Expired", -2),
        )
        .await
        .unwrap();
        AssignmentService::create_assignment(
            &pool,
            seeded.school_id,
            assignment_dto(other_class, "Other class", 3),
        )
        .await
        .unwrap();

        let visible =
            AssignmentService::list_for_student(&pool, seeded.school_id, seeded.student_id)
                .await
                .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Open");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_includes_class_label(pool: PgPool) {
        let seeded = seed(&pool, "a2").await;

        AssignmentService::create_assignment(
            &pool,
            seeded.school_id,
            assignment_dto(seeded.class_id, "Essay", 5),
        )
        .await
        .unwrap();

        let all = AssignmentService::list_assignments(&pool, seeded.school_id)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].class_text, "Grade 5");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_with_foreign_class_not_found(pool: PgPool) {
        let seeded_a = seed(&pool, "a3a").await;
        let seeded_b = seed(&pool, "a3b").await;

        let err = AssignmentService::create_assignment(
            &pool,
            seeded_a.school_id,
            assignment_dto(seeded_b.class_id, "Nope", 3),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_assignment(pool: PgPool) {
        let seeded = seed(&pool, "a4").await;
        let assignment = AssignmentService::create_assignment(
            &pool,
            seeded.school_id,
            assignment_dto(seeded.class_id, "Gone soon", 3),
        )
        .await
        .unwrap();

        AssignmentService::delete_assignment(&pool, seeded.school_id, assignment.id)
            .await
            .unwrap();

        let err = AssignmentService::delete_assignment(&pool, seeded.school_id, assignment.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
