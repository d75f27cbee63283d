use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::UserRole;
use slateroom_models::ids::{ClassId, ScheduleId, TeacherId};

use crate::middleware::auth::AuthUser;
use crate::modules::schedules::model::{
    CreateScheduleDto, Schedule, ScheduleWithNames, UpdateScheduleDto,
};
use crate::modules::schedules::service::ScheduleService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Book a time slot for a class
#[utoipa::path(
    post,
    path = "/api/schedules",
    summary = "Create schedule",
    request_body = CreateScheduleDto,
    responses(
        (status = 201, description = "Schedule created", body = Schedule),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Teacher, subject, or class not found"),
        (status = 409, description = "Overlaps an existing booking"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateScheduleDto>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let schedule = ScheduleService::create_schedule(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

/// List bookings for a class
#[utoipa::path(
    get,
    path = "/api/schedules/class/{class_id}",
    summary = "List class schedules",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Schedule list", body = [ScheduleWithNames]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_class_schedules(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleWithNames>>, AppError> {
    let schedules = ScheduleService::list_by_class(
        &state.db,
        auth_user.school_id(),
        ClassId::from(class_id),
    )
    .await?;

    Ok(Json(schedules))
}

/// List the calling teacher's own bookings
#[utoipa::path(
    get,
    path = "/api/schedules/teacher",
    summary = "List own schedules",
    responses(
        (status = 200, description = "Schedule list", body = [ScheduleWithNames]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_own_schedules(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ScheduleWithNames>>, AppError> {
    // The router guarantees a Teacher token here; the subject claim is the
    // teacher's own id.
    debug_assert_eq!(auth_user.role(), UserRole::Teacher);
    let teacher_id = TeacherId::from(auth_user.account_id()?);

    let schedules =
        ScheduleService::list_for_teacher(&state.db, auth_user.school_id(), teacher_id).await?;

    Ok(Json(schedules))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    summary = "Get schedule",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule details", body = ScheduleWithNames),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleWithNames>, AppError> {
    let schedule =
        ScheduleService::get_schedule(&state.db, auth_user.school_id(), ScheduleId::from(id))
            .await?;

    Ok(Json(schedule))
}

/// Update a booking
#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    summary = "Update schedule",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = UpdateScheduleDto,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Schedule, teacher, subject, or class not found"),
        (status = 409, description = "Overlaps an existing booking in the target class")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateScheduleDto>,
) -> Result<Json<Schedule>, AppError> {
    let schedule = ScheduleService::update_schedule(
        &state.db,
        auth_user.school_id(),
        ScheduleId::from(id),
        dto,
    )
    .await?;

    Ok(Json(schedule))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    summary = "Delete schedule",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ScheduleService::delete_schedule(&state.db, auth_user.school_id(), ScheduleId::from(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
