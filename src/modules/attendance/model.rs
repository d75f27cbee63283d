use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::AttendanceStatus;
use slateroom_models::ids::{AttendanceId, ClassId, SchoolId, StudentId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEntry {
    pub student_id: StudentId,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkAttendanceDto {
    pub class_id: ClassId,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "At least one student entry is required"))]
    pub entries: Vec<AttendanceEntry>,
}

/// Outcome of a bulk marking call.
#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAttendanceResponse {
    pub marked: usize,
    /// Students that already had a row for this date
    pub skipped: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceCheckResponse {
    pub taken: bool,
}
