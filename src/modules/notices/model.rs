use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::NoticeAudience;
use slateroom_models::ids::{NoticeId, SchoolId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notice {
    pub id: NoticeId,
    pub school_id: SchoolId,
    pub title: String,
    pub message: String,
    pub audience: NoticeAudience,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNoticeDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub audience: NoticeAudience,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNoticeDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub message: Option<String>,
    pub audience: Option<NoticeAudience>,
}
