use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::ids::{ClassId, ScheduleId, SchoolId, SubjectId, TeacherId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: ScheduleId,
    pub school_id: SchoolId,
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub class_id: ClassId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Schedule joined with its display names.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ScheduleWithNames {
    pub id: ScheduleId,
    pub school_id: SchoolId,
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub class_id: ClassId,
    pub teacher_name: String,
    pub subject_name: String,
    pub class_text: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleDto {
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub class_id: ClassId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleDto {
    pub teacher_id: Option<TeacherId>,
    pub subject_id: Option<SubjectId>,
    pub class_id: Option<ClassId>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
