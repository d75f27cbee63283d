use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use slateroom_core::PaginationMeta;
use slateroom_models::ids::{SchoolId, TeacherId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: TeacherId,
    pub school_id: SchoolId,
    pub name: String,
    pub email: String,
    pub qualification: String,
    pub age: i32,
    pub gender: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row fetched for credential checks only.
#[derive(Debug, FromRow)]
pub struct TeacherAuthRow {
    pub id: TeacherId,
    pub school_id: SchoolId,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, max = 200, message = "Qualification is required"))]
    pub qualification: String,
    #[validate(range(min = 18, max = 100, message = "Age must be between 18 and 100"))]
    pub age: i32,
    #[validate(length(min = 1, max = 50, message = "Gender is required"))]
    pub gender: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub qualification: Option<String>,
    #[validate(range(min = 18, max = 100))]
    pub age: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub gender: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TeacherFilterParams {
    /// Case-insensitive name substring filter
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: slateroom_core::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTeachersResponse {
    pub data: Vec<Teacher>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_rejects_under_age() {
        let dto = CreateTeacherDto {
            name: "J. Smith".to_string(),
            email: "jsmith@northside.edu".to_string(),
            qualification: "MSc".to_string(),
            age: 15,
            gender: "Female".to_string(),
            password: "long-enough-pass".to_string(),
            image_url: None,
        };

        assert!(dto.validate().is_err());
    }
}
