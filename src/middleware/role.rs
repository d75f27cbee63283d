//! Role-based authorization middleware.
//!
//! Each route group is layered with one of the `require_*` functions via
//! `axum::middleware::from_fn_with_state`, mirroring the per-route role
//! allow-lists of the API surface. The role is read from the verified
//! token claims, never from the request body.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};

use slateroom_core::AppError;
use slateroom_models::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Reject the request unless the caller's role is in `allowed_roles`.
pub async fn require_roles(
    state: AppState,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !allowed_roles.contains(&auth_user.role()) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied for role {}",
            auth_user.role()
        )));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_school(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::School]).await
}

pub async fn require_teacher(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::Teacher]).await
}

pub async fn require_student(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::Student]).await
}

pub async fn require_school_or_teacher(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::School, UserRole::Teacher]).await
}

pub async fn require_school_or_student(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::School, UserRole::Student]).await
}

/// Any authenticated account, regardless of role.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(
        state,
        req,
        next,
        &[UserRole::School, UserRole::Teacher, UserRole::Student],
    )
    .await
}
