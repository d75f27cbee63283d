use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::ids::{ClassId, SchoolId, TeacherId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: ClassId,
    pub school_id: SchoolId,
    /// Display label, e.g. "Grade 5" or "Form 2B"
    pub class_text: String,
    /// Numeric ordering key for the class level
    pub class_num: i32,
    /// Teacher responsible for taking attendance, if assigned
    pub attendee_teacher_id: Option<TeacherId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Class with its current enrollment count.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClassWithStats {
    pub id: ClassId,
    pub school_id: SchoolId,
    pub class_text: String,
    pub class_num: i32,
    pub attendee_teacher_id: Option<TeacherId>,
    pub student_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 100, message = "Class label is required"))]
    pub class_text: String,
    #[validate(range(min = 0, message = "Class number must be non-negative"))]
    pub class_num: i32,
    pub attendee_teacher_id: Option<TeacherId>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, max = 100))]
    pub class_text: Option<String>,
    #[validate(range(min = 0))]
    pub class_num: Option<i32>,
    pub attendee_teacher_id: Option<TeacherId>,
}
