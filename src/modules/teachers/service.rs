use sqlx::PgPool;
use tracing::instrument;

use slateroom_auth::create_access_token;
use slateroom_config::JwtConfig;
use slateroom_core::{AppError, PaginationMeta, hash_password, verify_password};
use slateroom_models::UserRole;
use slateroom_models::ids::{SchoolId, TeacherId};

use crate::modules::schools::model::LoginDto;
use crate::modules::schools::model::LoginResponse;
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherAuthRow, TeacherFilterParams,
    UpdateTeacherDto,
};

const TEACHER_COLUMNS: &str =
    "id, school_id, name, email, qualification, age, gender, image_url, created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    /// Register a teacher under the calling school.
    #[instrument(skip(db, dto))]
    pub async fn register_teacher(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"INSERT INTO teachers (school_id, name, email, qualification, age, gender, image_url, password)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {TEACHER_COLUMNS}"#,
        ))
        .bind(school_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.qualification)
        .bind(dto.age)
        .bind(&dto.gender)
        .bind(dto.image_url.as_deref().unwrap_or(""))
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A teacher with this email already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(teacher)
    }

    /// Authenticate a teacher account and mint an access token.
    #[instrument(skip(db, jwt_config, dto))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginDto,
    ) -> Result<LoginResponse, AppError> {
        let row = sqlx::query_as::<_, TeacherAuthRow>(
            "SELECT id, school_id, name, email, password FROM teachers WHERE email = $1",
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
            UserRole::Teacher,
            jwt_config,
        )?;

        Ok(LoginResponse {
            access_token,
            role: UserRole::Teacher,
            id: row.id.to_string(),
            name: row.name,
        })
    }

    /// Paginated teacher listing for a school, with an optional
    /// case-insensitive name filter.
    #[instrument(skip(db))]
    pub async fn list_teachers(
        db: &PgPool,
        school_id: SchoolId,
        filters: TeacherFilterParams,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let name_filter = filters.name.as_deref();

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM teachers
               WHERE school_id = $1
                 AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')"#,
        )
        .bind(school_id)
        .bind(name_filter)
        .fetch_one(db)
        .await?;

        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            r#"SELECT {TEACHER_COLUMNS} FROM teachers
               WHERE school_id = $1
                 AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
               ORDER BY name ASC
               LIMIT $3 OFFSET $4"#,
        ))
        .bind(school_id)
        .bind(name_filter)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        let has_more = offset + limit < total;

        Ok(PaginatedTeachersResponse {
            data: teachers,
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
    pub async fn get_teacher(
        db: &PgPool,
        school_id: SchoolId,
        teacher_id: TeacherId,
    ) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1 AND school_id = $2",
        ))
        .bind(teacher_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;

        Ok(teacher)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        school_id: SchoolId,
        teacher_id: TeacherId,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get_teacher(db, school_id, teacher_id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let qualification = dto.qualification.unwrap_or(existing.qualification);
        let age = dto.age.unwrap_or(existing.age);
        let gender = dto.gender.unwrap_or(existing.gender);
        let image_url = dto.image_url.unwrap_or(existing.image_url);

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"UPDATE teachers
               SET name = $1, qualification = $2, age = $3, gender = $4, image_url = $5, updated_at = NOW()
               WHERE id = $6 AND school_id = $7
               RETURNING {TEACHER_COLUMNS}"#,
        ))
        .bind(&name)
        .bind(&qualification)
        .bind(age)
        .bind(&gender)
        .bind(&image_url)
        .bind(teacher_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(teacher)
    }

    /// Delete a teacher. Rejected while any schedule still references them.
    #[instrument(skip(db))]
    pub async fn delete_teacher(
        db: &PgPool,
        school_id: SchoolId,
        teacher_id: TeacherId,
    ) -> Result<(), AppError> {
        let in_use = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM schedules WHERE teacher_id = $1)",
        )
        .bind(teacher_id)
        .fetch_one(db)
        .await?;

        if in_use {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Teacher has scheduled classes and cannot be deleted"
            )));
        }

        let result = sqlx::query("DELETE FROM teachers WHERE id = $1 AND school_id = $2")
            .bind(teacher_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        Ok(())
    }
}
