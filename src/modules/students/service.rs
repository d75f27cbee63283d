use sqlx::PgPool;
use tracing::instrument;

use slateroom_auth::create_access_token;
use slateroom_config::JwtConfig;
use slateroom_core::{AppError, PaginationMeta, hash_password, verify_password};
use slateroom_models::UserRole;
use slateroom_models::ids::{ClassId, SchoolId, StudentId};

use crate::modules::schools::model::{LoginDto, LoginResponse};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentAuthRow, StudentFilterParams,
    UpdateStudentDto,
};

const STUDENT_COLUMNS: &str = "id, school_id, class_id, name, email, age, gender, guardian, \
     guardian_phone, image_url, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    async fn class_in_school(
        db: &PgPool,
        school_id: SchoolId,
        class_id: ClassId,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND school_id = $2)",
        )
        .bind(class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }

    /// Enroll a student under the calling school.
    #[instrument(skip(db, dto))]
    pub async fn register_student(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        Self::class_in_school(db, school_id, dto.class_id).await?;

        let password_hash = hash_password(&dto.password)?;

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"INSERT INTO students (school_id, class_id, name, email, age, gender, guardian, guardian_phone, image_url, password)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {STUDENT_COLUMNS}"#,
        ))
        .bind(school_id)
        .bind(dto.class_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(dto.age)
        .bind(&dto.gender)
        .bind(&dto.guardian)
        .bind(&dto.guardian_phone)
        .bind(dto.image_url.as_deref().unwrap_or(""))
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A student with this email already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(student)
    }

    /// Authenticate a student account and mint an access token.
    #[instrument(skip(db, jwt_config, dto))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginDto,
    ) -> Result<LoginResponse, AppError> {
        let row = sqlx::query_as::<_, StudentAuthRow>(
            "SELECT id, school_id, name, email, password FROM students WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid email or password")))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let access_token = create_access_token(
            row.id.into_inner(),
            &row.email,
            &row.name,
            row.school_id,
            UserRole::Student,
            jwt_config,
        )?;

        Ok(LoginResponse {
            access_token,
            role: UserRole::Student,
            id: row.id.to_string(),
            name: row.name,
        })
    }

    /// Paginated student listing for a school, optionally limited to one class.
    #[instrument(skip(db))]
    pub async fn list_students(
        db: &PgPool,
        school_id: SchoolId,
        filters: StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM students
               WHERE school_id = $1 AND ($2::uuid IS NULL OR class_id = $2)"#,
        )
        .bind(school_id)
        .bind(filters.class_id)
        .fetch_one(db)
        .await?;

        let students = sqlx::query_as::<_, Student>(&format!(
            r#"SELECT {STUDENT_COLUMNS} FROM students
               WHERE school_id = $1 AND ($2::uuid IS NULL OR class_id = $2)
               ORDER BY name ASC
               LIMIT $3 OFFSET $4"#,
        ))
        .bind(school_id)
        .bind(filters.class_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                page: None,
                has_more,
            },
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1 AND school_id = $2",
        ))
        .bind(student_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, school_id, student_id).await?;

        if let Some(class_id) = dto.class_id {
            Self::class_in_school(db, school_id, class_id).await?;
        }

        let class_id = dto.class_id.unwrap_or(existing.class_id);
        let name = dto.name.unwrap_or(existing.name);
        let age = dto.age.unwrap_or(existing.age);
        let gender = dto.gender.unwrap_or(existing.gender);
        let guardian = dto.guardian.unwrap_or(existing.guardian);
        let guardian_phone = dto.guardian_phone.unwrap_or(existing.guardian_phone);
        let image_url = dto.image_url.unwrap_or(existing.image_url);

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"UPDATE students
               SET class_id = $1, name = $2, age = $3, gender = $4, guardian = $5,
                   guardian_phone = $6, image_url = $7, updated_at = NOW()
               WHERE id = $8 AND school_id = $9
               RETURNING {STUDENT_COLUMNS}"#,
        ))
        .bind(class_id)
        .bind(&name)
        .bind(age)
        .bind(&gender)
        .bind(&guardian)
        .bind(&guardian_phone)
        .bind(&image_url)
        .bind(student_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(student)
    }

    /// Delete a student. Rejected while attendance or fee records still
    /// reference them; those carry history the school may need.
    #[instrument(skip(db))]
    pub async fn delete_student(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
    ) -> Result<(), AppError> {
        let in_use = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM attendance WHERE student_id = $1)
               OR EXISTS(SELECT 1 FROM fees WHERE student_id = $1)"#,
        )
        .bind(student_id)
        .fetch_one(db)
        .await?;

        if in_use {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Student has attendance or fee records and cannot be deleted"
            )));
        }

        let result = sqlx::query("DELETE FROM students WHERE id = $1 AND school_id = $2")
            .bind(student_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
