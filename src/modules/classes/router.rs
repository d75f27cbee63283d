use axum::{Router, middleware, routing::get};

use crate::middleware::role::{require_school, require_school_or_teacher};
use crate::state::AppState;

use super::controller::{create_class, delete_class, get_class, list_classes, update_class};

/// Routes: GET /, GET /{id} (School or Teacher); POST /, PATCH /{id},
/// DELETE /{id} (School role).
pub fn init_classes_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_classes))
        .route("/{id}", get(get_class))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let manage = Router::new()
        .route("/", axum::routing::post(create_class))
        .route(
            "/{id}",
            axum::routing::patch(update_class).delete(delete_class),
        )
        .route_layer(middleware::from_fn_with_state(state, require_school));

    read.merge(manage)
}
