use axum::{Router, middleware, routing::get};

use crate::middleware::role::{require_authenticated, require_school};
use crate::state::AppState;

use super::controller::{create_subject, delete_subject, list_subjects};

/// Routes: GET / (any authenticated role); POST /, DELETE /{id} (School role).
pub fn init_subjects_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_subjects))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ));

    let manage = Router::new()
        .route("/", axum::routing::post(create_subject))
        .route("/{id}", axum::routing::delete(delete_subject))
        .route_layer(middleware::from_fn_with_state(state, require_school));

    read.merge(manage)
}
