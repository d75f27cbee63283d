use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::ids::{AssignmentId, ClassId, SchoolId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: AssignmentId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

/// Assignment joined with its class label.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AssignmentWithClass {
    pub id: AssignmentId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub class_text: String,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentDto {
    pub class_id: ClassId,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub deadline: DateTime<Utc>,
    #[validate(url(message = "File URL must be a valid URL"))]
    pub file_url: String,
}
