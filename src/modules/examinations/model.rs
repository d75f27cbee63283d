use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::ids::{ClassId, ExamId, SchoolId, SubjectId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Exam {
    pub id: ExamId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    /// Free-form label, e.g. "Midterm" or "Final"
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Exam joined with its display names.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ExamWithNames {
    pub id: ExamId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub exam_type: String,
    pub subject_name: String,
    pub class_text: String,
    pub exam_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExamDto {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    #[validate(length(min = 1, max = 100, message = "Exam type is required"))]
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateExamDto {
    pub subject_id: Option<SubjectId>,
    #[validate(length(min = 1, max = 100))]
    pub exam_type: Option<String>,
    pub exam_date: Option<DateTime<Utc>>,
}
