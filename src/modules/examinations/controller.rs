use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::ids::{ClassId, ExamId};

use crate::middleware::auth::AuthUser;
use crate::modules::examinations::model::{CreateExamDto, Exam, ExamWithNames, UpdateExamDto};
use crate::modules::examinations::service::ExamService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create an exam
#[utoipa::path(
    post,
    path = "/api/examinations",
    summary = "Create exam",
    request_body = CreateExamDto,
    responses(
        (status = 201, description = "Exam created", body = Exam),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class or subject not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Examinations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_exam(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateExamDto>,
) -> Result<(StatusCode, Json<Exam>), AppError> {
    let exam = ExamService::create_exam(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(exam)))
}

/// List the calling school's exams
#[utoipa::path(
    get,
    path = "/api/examinations",
    summary = "List exams",
    responses(
        (status = 200, description = "Exam list", body = [ExamWithNames]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Examinations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_exams(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ExamWithNames>>, AppError> {
    let exams = ExamService::list_exams(&state.db, auth_user.school_id()).await?;

    Ok(Json(exams))
}

/// List exams for one class
#[utoipa::path(
    get,
    path = "/api/examinations/class/{class_id}",
    summary = "List class exams",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Exam list", body = [ExamWithNames]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Examinations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_class_exams(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<Vec<ExamWithNames>>, AppError> {
    let exams =
        ExamService::list_by_class(&state.db, auth_user.school_id(), ClassId::from(class_id))
            .await?;

    Ok(Json(exams))
}

/// Update an exam
#[utoipa::path(
    put,
    path = "/api/examinations/{id}",
    summary = "Update exam",
    params(("id" = Uuid, Path, description = "Exam ID")),
    request_body = UpdateExamDto,
    responses(
        (status = 200, description = "Exam updated", body = Exam),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Exam not found")
    ),
    tag = "Examinations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_exam(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateExamDto>,
) -> Result<Json<Exam>, AppError> {
    let exam =
        ExamService::update_exam(&state.db, auth_user.school_id(), ExamId::from(id), dto).await?;

    Ok(Json(exam))
}

/// Delete an exam
#[utoipa::path(
    delete,
    path = "/api/examinations/{id}",
    summary = "Delete exam",
    params(("id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 204, description = "Exam deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Exam not found")
    ),
    tag = "Examinations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ExamService::delete_exam(&state.db, auth_user.school_id(), ExamId::from(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
