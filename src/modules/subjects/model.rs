use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::ids::{SchoolId, SubjectId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: SubjectId,
    pub school_id: SchoolId,
    pub subject_name: String,
    /// Short code unique within the school, e.g. "MATH-101"
    pub subject_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[validate(length(min = 1, max = 200, message = "Subject name is required"))]
    pub subject_name: String,
    #[validate(length(min = 1, max = 50, message = "Subject code is required"))]
    pub subject_code: String,
}
