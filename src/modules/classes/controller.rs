use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::ids::ClassId;

use crate::middleware::auth::AuthUser;
use crate::modules::classes::model::{Class, ClassWithStats, CreateClassDto, UpdateClassDto};
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a class
#[utoipa::path(
    post,
    path = "/api/classes",
    summary = "Create class",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Attendee teacher not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    let class = ClassService::create_class(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(class)))
}

/// List the calling school's classes with enrollment counts
#[utoipa::path(
    get,
    path = "/api/classes",
    summary = "List classes",
    responses(
        (status = 200, description = "Class list", body = [ClassWithStats]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ClassWithStats>>, AppError> {
    let classes = ClassService::list_classes(&state.db, auth_user.school_id()).await?;

    Ok(Json(classes))
}

/// Get a class by ID
#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    summary = "Get class",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = Class),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Class>, AppError> {
    let class =
        ClassService::get_class(&state.db, auth_user.school_id(), ClassId::from(id)).await?;

    Ok(Json(class))
}

/// Update a class
#[utoipa::path(
    patch,
    path = "/api/classes/{id}",
    summary = "Update class",
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated", body = Class),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<Class>, AppError> {
    let class =
        ClassService::update_class(&state.db, auth_user.school_id(), ClassId::from(id), dto)
            .await?;

    Ok(Json(class))
}

/// Delete a class
#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    summary = "Delete class",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found"),
        (status = 409, description = "Class still referenced")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ClassService::delete_class(&state.db, auth_user.school_id(), ClassId::from(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
