use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::role::{require_authenticated, require_school};
use crate::state::AppState;

use super::controller::{create_notice, delete_notice, list_notices, update_notice};

/// Routes: GET / (any role, audience-filtered); POST /, PATCH /{id},
/// DELETE /{id} (School).
pub fn init_notices_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_notices))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ));

    let manage = Router::new()
        .route("/", post(create_notice))
        .route("/{id}", patch(update_notice).delete(delete_notice))
        .route_layer(middleware::from_fn_with_state(state, require_school));

    read.merge(manage)
}
