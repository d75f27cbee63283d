use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use slateroom_core::PaginationMeta;
use slateroom_models::ids::{ClassId, SchoolId, StudentId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub gender: String,
    pub guardian: String,
    pub guardian_phone: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row fetched for credential checks only.
#[derive(Debug, FromRow)]
pub struct StudentAuthRow {
    pub id: StudentId,
    pub school_id: SchoolId,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    pub class_id: ClassId,
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(range(min = 3, max = 100, message = "Age must be between 3 and 100"))]
    pub age: i32,
    #[validate(length(min = 1, max = 50, message = "Gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, max = 200, message = "Guardian name is required"))]
    pub guardian: String,
    #[validate(length(min = 1, max = 50, message = "Guardian phone is required"))]
    pub guardian_phone: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    pub class_id: Option<ClassId>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 3, max = 100))]
    pub age: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub gender: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub guardian: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub guardian_phone: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct StudentFilterParams {
    /// Restrict the listing to one class
    pub class_id: Option<ClassId>,
    #[serde(flatten)]
    pub pagination: slateroom_core::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}
