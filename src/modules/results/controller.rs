use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::ids::{ExamId, StudentId};

use crate::middleware::auth::AuthUser;
use crate::modules::results::model::{ResultRecord, UploadResultsDto, UploadResultsResponse};
use crate::modules::results::service::ResultService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Upload the result sheet for an exam
#[utoipa::path(
    post,
    path = "/api/results/upload/{exam_id}",
    summary = "Upload exam results",
    params(("exam_id" = Uuid, Path, description = "Exam ID")),
    request_body = UploadResultsDto,
    responses(
        (status = 201, description = "Results uploaded", body = UploadResultsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Exam or student not found"),
        (status = 409, description = "Results already uploaded"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn upload_results(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(exam_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UploadResultsDto>,
) -> Result<(StatusCode, Json<UploadResultsResponse>), AppError> {
    let response = ResultService::upload_results(
        &state.db,
        auth_user.school_id(),
        ExamId::from(exam_id),
        dto,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// All results for an exam
#[utoipa::path(
    get,
    path = "/api/results/exam/{exam_id}",
    summary = "List exam results",
    params(("exam_id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Result list", body = [ResultRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Exam not found")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn exam_results(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(exam_id): Path<Uuid>,
) -> Result<Json<Vec<ResultRecord>>, AppError> {
    let results =
        ResultService::exam_results(&state.db, auth_user.school_id(), ExamId::from(exam_id))
            .await?;

    Ok(Json(results))
}

/// The calling student's own result for an exam
#[utoipa::path(
    get,
    path = "/api/results/my/{exam_id}",
    summary = "Own exam result",
    params(("exam_id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Result", body = ResultRecord),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Result not found")
    ),
    tag = "Results",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn my_result(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(exam_id): Path<Uuid>,
) -> Result<Json<ResultRecord>, AppError> {
    let student_id = StudentId::from(auth_user.account_id()?);

    let result = ResultService::student_result(
        &state.db,
        auth_user.school_id(),
        ExamId::from(exam_id),
        student_id,
    )
    .await?;

    Ok(Json(result))
}
