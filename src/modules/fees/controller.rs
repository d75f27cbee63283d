use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use slateroom_core::AppError;
use slateroom_models::ids::StudentId;

use crate::middleware::auth::AuthUser;
use crate::modules::fees::model::{
    AssignFeesResponse, CreateFeeTemplateDto, Fee, FeeFilterParams, FeeWithDetails,
    RecordPaymentDto,
};
use crate::modules::fees::service::FeeService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Assign a fee to every student in a class
#[utoipa::path(
    post,
    path = "/api/fees/assign",
    summary = "Assign fee template",
    request_body = CreateFeeTemplateDto,
    responses(
        (status = 201, description = "Fees assigned", body = AssignFeesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Fees",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn assign_fees(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateFeeTemplateDto>,
) -> Result<(StatusCode, Json<AssignFeesResponse>), AppError> {
    let response = FeeService::assign_template(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// All fees in the school, optionally for one class
#[utoipa::path(
    get,
    path = "/api/fees",
    summary = "List fees",
    params(FeeFilterParams),
    responses(
        (status = 200, description = "Fee list", body = [FeeWithDetails]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Fees",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_fees(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<FeeFilterParams>,
) -> Result<Json<Vec<FeeWithDetails>>, AppError> {
    let fees = FeeService::list_fees(&state.db, auth_user.school_id(), params.class_id).await?;

    Ok(Json(fees))
}

/// The calling student's own fees
#[utoipa::path(
    get,
    path = "/api/fees/my",
    summary = "Own fees",
    responses(
        (status = 200, description = "Fee list", body = [FeeWithDetails]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Fees",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn my_fees(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<FeeWithDetails>>, AppError> {
    let student_id = StudentId::from(auth_user.account_id()?);

    let fees = FeeService::list_for_student(&state.db, auth_user.school_id(), student_id).await?;

    Ok(Json(fees))
}

/// Payment gateway callback. Marks a pending fee paid with the gateway's
/// reference; callback signature verification happens upstream.
#[utoipa::path(
    post,
    path = "/api/fees/payments",
    summary = "Record fee payment",
    request_body = RecordPaymentDto,
    responses(
        (status = 200, description = "Payment recorded", body = Fee),
        (status = 404, description = "Fee not found"),
        (status = 409, description = "Fee not pending or reference replayed"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Fees"
)]
#[instrument(skip(state, dto))]
pub async fn record_payment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RecordPaymentDto>,
) -> Result<Json<Fee>, AppError> {
    let fee = FeeService::record_payment(&state.db, dto).await?;

    Ok(Json(fee))
}
