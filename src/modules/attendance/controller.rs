use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::ids::{ClassId, StudentId};

use crate::middleware::auth::AuthUser;
use crate::modules::attendance::model::{
    AttendanceCheckResponse, AttendanceRecord, MarkAttendanceDto, MarkAttendanceResponse,
};
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Mark attendance for a class on one date
#[utoipa::path(
    post,
    path = "/api/attendance/mark",
    summary = "Mark attendance",
    request_body = MarkAttendanceDto,
    responses(
        (status = 200, description = "Attendance recorded", body = MarkAttendanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class or student not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<MarkAttendanceDto>,
) -> Result<Json<MarkAttendanceResponse>, AppError> {
    let response =
        AttendanceService::mark_attendance(&state.db, auth_user.school_id(), dto).await?;

    Ok(Json(response))
}

/// A student's attendance history
#[utoipa::path(
    get,
    path = "/api/attendance/student/{student_id}",
    summary = "Student attendance history",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn student_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let records = AttendanceService::student_history(
        &state.db,
        auth_user.school_id(),
        StudentId::from(student_id),
    )
    .await?;

    Ok(Json(records))
}

/// The calling student's own attendance history
#[utoipa::path(
    get,
    path = "/api/attendance/my",
    summary = "Own attendance history",
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn my_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let student_id = StudentId::from(auth_user.account_id()?);

    let records =
        AttendanceService::student_history(&state.db, auth_user.school_id(), student_id).await?;

    Ok(Json(records))
}

/// Whether attendance has already been taken today for a class
#[utoipa::path(
    get,
    path = "/api/attendance/check/{class_id}",
    summary = "Check attendance taken today",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Check result", body = AttendanceCheckResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn check_taken_today(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<AttendanceCheckResponse>, AppError> {
    let taken = AttendanceService::taken_on(
        &state.db,
        auth_user.school_id(),
        ClassId::from(class_id),
        Utc::now().date_naive(),
    )
    .await?;

    Ok(Json(AttendanceCheckResponse { taken }))
}
