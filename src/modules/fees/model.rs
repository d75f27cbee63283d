use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use slateroom_models::FeeStatus;
use slateroom_models::ids::{ClassId, FeeId, FeeTemplateId, SchoolId, StudentId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeeTemplate {
    pub id: FeeTemplateId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub title: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fee {
    pub id: FeeId,
    pub school_id: SchoolId,
    pub student_id: StudentId,
    pub class_id: ClassId,
    pub template_id: FeeTemplateId,
    pub status: FeeStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fee joined with its template and student for listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FeeWithDetails {
    pub id: FeeId,
    pub student_id: StudentId,
    pub student_name: String,
    pub class_id: ClassId,
    pub title: String,
    pub amount: i64,
    pub due_date: DateTime<Utc>,
    pub status: FeeStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_ref: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeeTemplateDto {
    pub class_id: ClassId,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
    pub due_date: DateTime<Utc>,
}

/// Outcome of assigning a template to a class.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssignFeesResponse {
    pub template: FeeTemplate,
    /// Pending fees created, one per enrolled student
    pub assigned: u64,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct FeeFilterParams {
    /// Restrict the listing to one class
    pub class_id: Option<ClassId>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordPaymentDto {
    pub fee_id: FeeId,
    #[validate(length(min = 1, max = 200, message = "Payment reference is required"))]
    pub payment_ref: String,
}
