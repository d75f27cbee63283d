use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::ids::StudentId;

use crate::middleware::auth::AuthUser;
use crate::modules::schools::model::{LoginDto, LoginResponse};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Enroll a student under the calling school
#[utoipa::path(
    post,
    path = "/api/students/register",
    summary = "Register student",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student registered", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student =
        StudentService::register_student(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// Log in as a student
#[utoipa::path(
    post,
    path = "/api/students/login",
    summary = "Student login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = StudentService::login(&state.db, &state.jwt_config, dto).await?;

    Ok(Json(response))
}

/// List the calling school's students
#[utoipa::path(
    get,
    path = "/api/students",
    summary = "List students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Student list", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filters): Query<StudentFilterParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let page = StudentService::list_students(&state.db, auth_user.school_id(), filters).await?;

    Ok(Json(page))
}

/// Get a student by ID
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    summary = "Get student",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student =
        StudentService::get_student(&state.db, auth_user.school_id(), StudentId::from(id)).await?;

    Ok(Json(student))
}

/// Update a student
#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    summary = "Update student",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(
        &state.db,
        auth_user.school_id(),
        StudentId::from(id),
        dto,
    )
    .await?;

    Ok(Json(student))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    summary = "Delete student",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Student has attendance or fee records")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(&state.db, auth_user.school_id(), StudentId::from(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
