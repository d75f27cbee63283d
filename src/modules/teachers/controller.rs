use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::ids::TeacherId;

use crate::middleware::auth::AuthUser;
use crate::modules::schools::model::{LoginDto, LoginResponse};
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherFilterParams, UpdateTeacherDto,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a teacher under the calling school
#[utoipa::path(
    post,
    path = "/api/teachers/register",
    summary = "Register teacher",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher registered", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher =
        TeacherService::register_teacher(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

/// Log in as a teacher
#[utoipa::path(
    post,
    path = "/api/teachers/login",
    summary = "Teacher login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = TeacherService::login(&state.db, &state.jwt_config, dto).await?;

    Ok(Json(response))
}

/// List the calling school's teachers
#[utoipa::path(
    get,
    path = "/api/teachers",
    summary = "List teachers",
    params(TeacherFilterParams),
    responses(
        (status = 200, description = "Teacher list", body = PaginatedTeachersResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_teachers(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filters): Query<TeacherFilterParams>,
) -> Result<Json<PaginatedTeachersResponse>, AppError> {
    let page = TeacherService::list_teachers(&state.db, auth_user.school_id(), filters).await?;

    Ok(Json(page))
}

/// Get a teacher by ID
#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    summary = "Get teacher",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, AppError> {
    let teacher =
        TeacherService::get_teacher(&state.db, auth_user.school_id(), TeacherId::from(id)).await?;

    Ok(Json(teacher))
}

/// Update a teacher
#[utoipa::path(
    patch,
    path = "/api/teachers/{id}",
    summary = "Update teacher",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::update_teacher(
        &state.db,
        auth_user.school_id(),
        TeacherId::from(id),
        dto,
    )
    .await?;

    Ok(Json(teacher))
}

/// Delete a teacher
#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    summary = "Delete teacher",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 204, description = "Teacher deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Teacher not found"),
        (status = 409, description = "Teacher has scheduled classes")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    TeacherService::delete_teacher(&state.db, auth_user.school_id(), TeacherId::from(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
