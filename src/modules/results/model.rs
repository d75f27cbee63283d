use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::ids::{ExamId, ResultId, StudentId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResultRecord {
    pub id: ResultId,
    pub exam_id: ExamId,
    pub student_id: StudentId,
    /// Subject name to marks mapping, stored as JSONB
    #[schema(value_type = Object)]
    pub subject_marks: serde_json::Value,
    pub total_marks: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResultEntry {
    pub student_id: StudentId,
    /// Subject name to marks mapping
    #[schema(value_type = Object)]
    pub subject_marks: HashMap<String, i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UploadResultsDto {
    #[validate(length(min = 1, message = "At least one result entry is required"))]
    pub entries: Vec<ResultEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResultsResponse {
    pub uploaded: usize,
}
