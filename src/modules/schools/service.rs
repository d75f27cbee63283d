use sqlx::PgPool;
use tracing::instrument;

use slateroom_auth::create_access_token;
use slateroom_config::JwtConfig;
use slateroom_core::{AppError, hash_password, verify_password};
use slateroom_models::UserRole;
use slateroom_models::ids::SchoolId;

use crate::modules::schools::model::{
    LoginDto, LoginResponse, RegisterSchoolDto, School, SchoolAuthRow, SchoolListEntry,
    UpdateSchoolDto,
};

const SCHOOL_COLUMNS: &str = "id, name, owner_name, email, image_url, created_at, updated_at";

pub struct SchoolService;

impl SchoolService {
    /// Whether a school account already exists for this email.
    #[instrument(skip(db))]
    pub async fn email_registered(db: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM schools WHERE email = $1)")
                .bind(email)
                .fetch_one(db)
                .await?;

        Ok(exists)
    }

    /// Register a new school account.
    ///
    /// The OTP handshake happens before this call; by the time register is
    /// invoked the email has been verified (or the client skipped the step,
    /// which only hurts itself when the address is wrong).
    #[instrument(skip(db, dto))]
    pub async fn register_school(db: &PgPool, dto: RegisterSchoolDto) -> Result<School, AppError> {
        if Self::email_registered(db, &dto.email).await? {
            return Err(AppError::conflict(anyhow::anyhow!(
                "A school with this email already exists"
            )));
        }

        let password_hash = hash_password(&dto.password)?;

        let school = sqlx::query_as::<_, School>(&format!(
            r#"INSERT INTO schools (name, owner_name, email, image_url, password)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {SCHOOL_COLUMNS}"#,
        ))
        .bind(&dto.name)
        .bind(&dto.owner_name)
        .bind(&dto.email)
        .bind(dto.image_url.as_deref().unwrap_or(""))
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A school with this email already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(school)
    }

    /// Authenticate a school account and mint an access token.
    #[instrument(skip(db, jwt_config, dto))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginDto,
    ) -> Result<LoginResponse, AppError> {
        let row = sqlx::query_as::<_, SchoolAuthRow>(
            "SELECT id, name, owner_name, email, password FROM schools WHERE email = $1",
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
            row.id,
            UserRole::School,
            jwt_config,
        )?;

        Ok(LoginResponse {
            access_token,
            role: UserRole::School,
            id: row.id.to_string(),
            name: row.name,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_school(db: &PgPool, school_id: SchoolId) -> Result<School, AppError> {
        let school = sqlx::query_as::<_, School>(&format!(
            "SELECT {SCHOOL_COLUMNS} FROM schools WHERE id = $1",
        ))
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("School not found")))?;

        Ok(school)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_school(
        db: &PgPool,
        school_id: SchoolId,
        dto: UpdateSchoolDto,
    ) -> Result<School, AppError> {
        let existing = Self::get_school(db, school_id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let owner_name = dto.owner_name.unwrap_or(existing.owner_name);
        let image_url = dto.image_url.unwrap_or(existing.image_url);

        let school = sqlx::query_as::<_, School>(&format!(
            r#"UPDATE schools
               SET name = $1, owner_name = $2, image_url = $3, updated_at = NOW()
               WHERE id = $4
               RETURNING {SCHOOL_COLUMNS}"#,
        ))
        .bind(&name)
        .bind(&owner_name)
        .bind(&image_url)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(school)
    }

    /// Id + name listing for the public login page.
    #[instrument(skip(db))]
    pub async fn list_schools(db: &PgPool) -> Result<Vec<SchoolListEntry>, AppError> {
        let schools = sqlx::query_as::<_, SchoolListEntry>(
            "SELECT id, name FROM schools ORDER BY name ASC",
        )
        .fetch_all(db)
        .await?;

        Ok(schools)
    }
}
