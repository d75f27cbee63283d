use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::{ClassId, SchoolId, TeacherId};

use crate::modules::classes::model::{Class, ClassWithStats, CreateClassDto, UpdateClassDto};

const CLASS_COLUMNS: &str =
    "id, school_id, class_text, class_num, attendee_teacher_id, created_at, updated_at";

pub struct ClassService;

impl ClassService {
    async fn teacher_in_school(
        db: &PgPool,
        school_id: SchoolId,
        teacher_id: TeacherId,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1 AND school_id = $2)",
        )
        .bind(teacher_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn create_class(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateClassDto,
    ) -> Result<Class, AppError> {
        if let Some(teacher_id) = dto.attendee_teacher_id {
            Self::teacher_in_school(db, school_id, teacher_id).await?;
        }

        let class = sqlx::query_as::<_, Class>(&format!(
            r#"INSERT INTO classes (school_id, class_text, class_num, attendee_teacher_id)
               VALUES ($1, $2, $3, $4)
               RETURNING {CLASS_COLUMNS}"#,
        ))
        .bind(school_id)
        .bind(&dto.class_text)
        .bind(dto.class_num)
        .bind(dto.attendee_teacher_id)
        .fetch_one(db)
        .await?;

        Ok(class)
    }

    /// Class listing with enrollment counts, ordered by level.
    #[instrument(skip(db))]
    pub async fn list_classes(
        db: &PgPool,
        school_id: SchoolId,
    ) -> Result<Vec<ClassWithStats>, AppError> {
        let classes = sqlx::query_as::<_, ClassWithStats>(
            r#"SELECT
                c.id, c.school_id, c.class_text, c.class_num, c.attendee_teacher_id,
                COUNT(s.id) AS student_count,
                c.created_at, c.updated_at
               FROM classes c
               LEFT JOIN students s ON s.class_id = c.id
               WHERE c.school_id = $1
               GROUP BY c.id
               ORDER BY c.class_num ASC, c.class_text ASC"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(db))]
    pub async fn get_class(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
    ) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1 AND school_id = $2",
        ))
        .bind(class_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))?;

        Ok(class)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_class(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        let existing = Self::get_class(db, school_id, class_id).await?;

        if let Some(teacher_id) = dto.attendee_teacher_id {
            Self::teacher_in_school(db, school_id, teacher_id).await?;
        }

        let class_text = dto.class_text.unwrap_or(existing.class_text);
        let class_num = dto.class_num.unwrap_or(existing.class_num);
        let attendee_teacher_id = dto.attendee_teacher_id.or(existing.attendee_teacher_id);

        let class = sqlx::query_as::<_, Class>(&format!(
            r#"UPDATE classes
               SET class_text = $1, class_num = $2, attendee_teacher_id = $3, updated_at = NOW()
               WHERE id = $4 AND school_id = $5
               RETURNING {CLASS_COLUMNS}"#,
        ))
        .bind(&class_text)
        .bind(class_num)
        .bind(attendee_teacher_id)
        .bind(class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(class)
    }

    /// Delete a class. Rejected while students, exams, or schedules still
    /// reference it.
    #[instrument(skip(db))]
    pub async fn delete_class(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
    ) -> Result<(), AppError> {
        let in_use = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM students WHERE class_id = $1)
               OR EXISTS(SELECT 1 FROM exams WHERE class_id = $1)
               OR EXISTS(SELECT 1 FROM schedules WHERE class_id = $1)"#,
        )
        .bind(class_id)
        .fetch_one(db)
        .await?;

        if in_use {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Class has students, exams, or schedules and cannot be deleted"
            )));
        }

        let result = sqlx::query("DELETE FROM classes WHERE id = $1 AND school_id = $2")
            .bind(class_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn seed_school(pool: &PgPool, email: &str) -> SchoolId {
        sqlx::query_scalar::<_, SchoolId>(
            r#"INSERT INTO schools (name, owner_name, email, password)
               VALUES ('Test School', 'Owner', $1, 'not-a-real-hash')
               RETURNING id"#,
        )
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn class_dto(text: &str, num: i32) -> CreateClassDto {
        CreateClassDto {
            class_text: text.to_string(),
            class_num: num,
            attendee_teacher_id: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_list_classes(pool: PgPool) {
        let school_id = seed_school(&pool, "s@test.edu").await;

        ClassService::create_class(&pool, school_id, class_dto("Grade 2", 2))
            .await
            .unwrap();
        ClassService::create_class(&pool, school_id, class_dto("Grade 1", 1))
            .await
            .unwrap();

        let classes = ClassService::list_classes(&pool, school_id).await.unwrap();
        assert_eq!(classes.len(), 2);
        // Ordered by class_num
        assert_eq!(classes[0].class_text, "Grade 1");
        assert_eq!(classes[0].student_count, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_class_with_foreign_teacher_not_found(pool: PgPool) {
        let school_a = seed_school(&pool, "a@test.edu").await;
        let school_b = seed_school(&pool, "b@test.edu").await;

        let teacher_id = sqlx::query_scalar::<_, TeacherId>(
            r#"INSERT INTO teachers (school_id, name, email, qualification, age, gender, password)
               VALUES ($1, 'T', 't@test.edu', 'BEd', 30, 'Male', 'hash')
               RETURNING id"#,
        )
        .bind(school_b)
        .fetch_one(&pool)
        .await
        .unwrap();

        let err = ClassService::create_class(
            &pool,
            school_a,
            CreateClassDto {
                class_text: "Grade 1".to_string(),
                class_num: 1,
                attendee_teacher_id: Some(teacher_id),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_class_blocked_by_students(pool: PgPool) {
        let school_id = seed_school(&pool, "s@test.edu").await;
        let class = ClassService::create_class(&pool, school_id, class_dto("Grade 3", 3))
            .await
            .unwrap();

        sqlx::query(
            r#"INSERT INTO students (school_id, class_id, name, email, age, gender, guardian, guardian_phone, password)
               VALUES ($1, $2, 'S', 's@test.edu', 10, 'Female', 'G', '555', 'hash')"#,
        )
        .bind(school_id)
        .bind(class.id)
        .execute(&pool)
        .await
        .unwrap();

        let err = ClassService::delete_class(&pool, school_id, class.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_empty_class(pool: PgPool) {
        let school_id = seed_school(&pool, "s@test.edu").await;
        let class = ClassService::create_class(&pool, school_id, class_dto("Grade 4", 4))
            .await
            .unwrap();

        ClassService::delete_class(&pool, school_id, class.id)
            .await
            .unwrap();

        let err = ClassService::get_class(&pool, school_id, class.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
