use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::ids::{AssignmentId, StudentId};

use crate::middleware::auth::AuthUser;
use crate::modules::assignments::model::{Assignment, AssignmentWithClass, CreateAssignmentDto};
use crate::modules::assignments::service::AssignmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Hand out an assignment to a class
#[utoipa::path(
    post,
    path = "/api/assignments",
    summary = "Create assignment",
    request_body = CreateAssignmentDto,
    responses(
        (status = 201, description = "Assignment created", body = Assignment),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAssignmentDto>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let assignment =
        AssignmentService::create_assignment(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Every assignment in the school
#[utoipa::path(
    get,
    path = "/api/assignments",
    summary = "List assignments",
    responses(
        (status = 200, description = "Assignment list", body = [AssignmentWithClass]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<AssignmentWithClass>>, AppError> {
    let assignments =
        AssignmentService::list_assignments(&state.db, auth_user.school_id()).await?;

    Ok(Json(assignments))
}

/// Open assignments for the calling student's class
#[utoipa::path(
    get,
    path = "/api/assignments/my",
    summary = "Own open assignments",
    responses(
        (status = 200, description = "Assignment list", body = [Assignment]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn my_assignments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let student_id = StudentId::from(auth_user.account_id()?);

    let assignments =
        AssignmentService::list_for_student(&state.db, auth_user.school_id(), student_id).await?;

    Ok(Json(assignments))
}

/// Withdraw an assignment
#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    summary = "Delete assignment",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AssignmentService::delete_assignment(&state.db, auth_user.school_id(), AssignmentId::from(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
