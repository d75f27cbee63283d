use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use slateroom_models::ids::SchoolId;

/// School entity as returned by the API. The password hash never leaves
/// the service layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row fetched for credential checks only.
#[derive(Debug, FromRow)]
pub struct SchoolAuthRow {
    pub id: SchoolId,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub password: String,
}

/// Minimal listing entry for the public login page.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SchoolListEntry {
    pub id: SchoolId,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendOtpDto {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpDto {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 6, max = 6, message = "OTP must be 6 digits"))]
    pub otp: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterSchoolDto {
    #[validate(length(min = 1, max = 200, message = "School name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "Owner name is required"))]
    pub owner_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSchoolDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub owner_name: Option<String>,
    pub image_url: Option<String>,
}

/// Login response shared by all three account types.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: slateroom_models::UserRole,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
