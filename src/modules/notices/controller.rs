use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use slateroom_core::AppError;
use slateroom_models::{NoticeAudience, UserRole};
use slateroom_models::ids::NoticeId;

use crate::middleware::auth::AuthUser;
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::notices::service::NoticeService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Post a notice to the board
#[utoipa::path(
    post,
    path = "/api/notices",
    summary = "Create notice",
    request_body = CreateNoticeDto,
    responses(
        (status = 201, description = "Notice created", body = Notice),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Notices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNoticeDto>,
) -> Result<(StatusCode, Json<Notice>), AppError> {
    let notice = NoticeService::create_notice(&state.db, auth_user.school_id(), dto).await?;

    Ok((StatusCode::CREATED, Json(notice)))
}

/// Noticeboard for the last 7 days. Teachers and students only see
/// notices addressed to everyone or to their role.
#[utoipa::path(
    get,
    path = "/api/notices",
    summary = "List recent notices",
    responses(
        (status = 200, description = "Notice list", body = [Notice]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Notices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_notices(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Notice>>, AppError> {
    let audience = match auth_user.role() {
        UserRole::School => None,
        UserRole::Teacher => Some(NoticeAudience::Teacher),
        UserRole::Student => Some(NoticeAudience::Student),
    };

    let notices = NoticeService::list_notices(&state.db, auth_user.school_id(), audience).await?;

    Ok(Json(notices))
}

/// Edit a notice
#[utoipa::path(
    patch,
    path = "/api/notices/{id}",
    summary = "Update notice",
    params(("id" = Uuid, Path, description = "Notice ID")),
    request_body = UpdateNoticeDto,
    responses(
        (status = 200, description = "Notice updated", body = Notice),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Notice not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Notices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateNoticeDto>,
) -> Result<Json<Notice>, AppError> {
    let notice = NoticeService::update_notice(
        &state.db,
        auth_user.school_id(),
        NoticeId::from(id),
        dto,
    )
    .await?;

    Ok(Json(notice))
}

/// Take a notice down
#[utoipa::path(
    delete,
    path = "/api/notices/{id}",
    summary = "Delete notice",
    params(("id" = Uuid, Path, description = "Notice ID")),
    responses(
        (status = 204, description = "Notice deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Notice not found")
    ),
    tag = "Notices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    NoticeService::delete_notice(&state.db, auth_user.school_id(), NoticeId::from(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
