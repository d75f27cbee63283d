//! Access-token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use slateroom_config::JwtConfig;
use slateroom_core::AppError;
use slateroom_models::UserRole;
use slateroom_models::ids::SchoolId;
use uuid::Uuid;

use crate::claims::Claims;

/// Create an HS256 access token for an authenticated account.
pub fn create_access_token(
    account_id: Uuid,
    email: &str,
    name: &str,
    school_id: SchoolId,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: account_id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        school_id,
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verify a bearer token and return its claims.
///
/// Expired, tampered, or otherwise malformed tokens all collapse into a
/// single 401; the caller gets no detail to probe with.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid or expired token")))
}
