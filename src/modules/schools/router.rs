use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_governor::GovernorLayer;

use crate::middleware::role::require_school;
use crate::state::AppState;

use super::controller::{all_schools, login, me, register, send_otp, update_me, verify_otp};

/// Routes: POST /send-otp, POST /verify-otp, POST /register, POST /login,
/// GET /all (public, rate-limited); GET /me, PATCH /me (School role).
pub fn init_schools_router(state: AppState) -> Router<AppState> {
    let auth_governor = state.rate_limit_config.auth_governor_config();

    let public = Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/register", post(register))
        .route("/login", post(login))
        .layer(GovernorLayer::new(auth_governor))
        .route("/all", get(all_schools));

    let protected = Router::new()
        .route("/me", get(me).patch(update_me))
        .route_layer(middleware::from_fn_with_state(state, require_school));

    public.merge(protected)
}
