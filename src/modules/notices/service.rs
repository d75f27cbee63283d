use sqlx::PgPool;
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::NoticeAudience;
use slateroom_models::ids::{NoticeId, SchoolId};

use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};

const NOTICE_COLUMNS: &str = "id, school_id, title, message, audience, created_at";

pub struct NoticeService;

impl NoticeService {
    #[instrument(skip(db, dto))]
    pub async fn create_notice(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateNoticeDto,
    ) -> Result<Notice, AppError> {
        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"INSERT INTO notices (school_id, title, message, audience)
               VALUES ($1, $2, $3, $4)
               RETURNING {NOTICE_COLUMNS}"#,
        ))
        .bind(school_id)
        .bind(&dto.title)
        .bind(&dto.message)
        .bind(dto.audience)
        .fetch_one(db)
        .await?;

        Ok(notice)
    }

    /// Notices from the trailing 7 days, newest first. `audience` restricts
    /// to notices for everyone plus that role; `None` returns all of them.
    #[instrument(skip(db))]
    pub async fn list_notices(
        db: &PgPool,
        school_id: SchoolId,
        audience: Option<NoticeAudience>,
    ) -> Result<Vec<Notice>, AppError> {
        let notices = sqlx::query_as::<_, Notice>(&format!(
            r#"SELECT {NOTICE_COLUMNS} FROM notices
               WHERE school_id = $1
                 AND created_at >= NOW() - INTERVAL '7 days'
                 AND ($2::text IS NULL OR audience = 'ALL' OR audience = $2)
               ORDER BY created_at DESC"#,
        ))
        .bind(school_id)
        .bind(audience.map(|a| a.as_str()))
        .fetch_all(db)
        .await?;

        Ok(notices)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_notice(
        db: &PgPool,
        school_id: SchoolId,
        notice_id: NoticeId,
        dto: UpdateNoticeDto,
    ) -> Result<Notice, AppError> {
        let existing = sqlx::query_as::<_, Notice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices WHERE id = $1 AND school_id = $2",
        ))
        .bind(notice_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notice not found")))?;

        let title = dto.title.unwrap_or(existing.title);
        let message = dto.message.unwrap_or(existing.message);
        let audience = dto.audience.unwrap_or(existing.audience);

        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"UPDATE notices
               SET title = $1, message = $2, audience = $3
               WHERE id = $4 AND school_id = $5
               RETURNING {NOTICE_COLUMNS}"#,
        ))
        .bind(&title)
        .bind(&message)
        .bind(audience)
        .bind(notice_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(notice)
    }

    #[instrument(skip(db))]
    pub async fn delete_notice(
        db: &PgPool,
        school_id: SchoolId,
        notice_id: NoticeId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1 AND school_id = $2")
            .bind(notice_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Notice not found")));
        }

        Ok(())
    }
}
