use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use slateroom_auth::{Claims, verify_token};
use slateroom_core::AppError;
use slateroom_models::UserRole;
use slateroom_models::ids::SchoolId;

use crate::state::AppState;

/// Extractor that validates the bearer token and yields the caller's claims.
///
/// Handlers never see the raw token; they read the account id, role, and
/// tenant scope from here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The caller's tenant scope.
    pub fn school_id(&self) -> SchoolId {
        self.0.school_id
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    /// The account ID from the subject claim.
    pub fn account_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid account ID in token")))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
