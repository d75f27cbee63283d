//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use slateroom_models::UserRole;
use slateroom_models::ids::SchoolId;

/// Access-token claims.
///
/// Every request arrives with a verified copy of these; handlers never parse
/// tokens themselves. `school_id` is the tenant boundary: for a School
/// account it is the school's own id, for Teacher/Student accounts it is the
/// owning school's id. All data queries filter on it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Account email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Tenant scope
    pub school_id: SchoolId,
    /// Account role
    pub role: UserRole,
    /// Token expiration (Unix timestamp)
    pub exp: usize,
    /// Token issued-at (Unix timestamp)
    pub iat: usize,
}
