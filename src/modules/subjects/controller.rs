use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::ids::SubjectId;

use crate::middleware::auth::AuthUser;
use crate::modules::subjects::model::{CreateSubjectDto, Subject};
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a subject
#[utoipa::path(
    post,
    path = "/api/subjects",
    summary = "Create subject",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Subject code already in use"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = SubjectService::create_subject(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(subject)))
}

/// List the calling school's subjects
#[utoipa::path(
    get,
    path = "/api/subjects",
    summary = "List subjects",
    responses(
        (status = 200, description = "Subject list", body = [Subject]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_subjects(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = SubjectService::list_subjects(&state.db, auth_user.school_id()).await?;

    Ok(Json(subjects))
}

/// Delete a subject
#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    summary = "Delete subject",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Subject still referenced")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    SubjectService::delete_subject(&state.db, auth_user.school_id(), SubjectId::from(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
