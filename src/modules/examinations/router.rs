use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_authenticated, require_school};
use crate::state::AppState;

use super::controller::{create_exam, delete_exam, list_class_exams, list_exams, update_exam};

/// Routes: GET /, GET /class/{class_id} (any authenticated role);
/// POST /, PUT /{id}, DELETE /{id} (School role).
pub fn init_examinations_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(list_exams))
        .route("/class/{class_id}", get(list_class_exams))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ));

    let manage = Router::new()
        .route("/", post(create_exam))
        .route("/{id}", axum::routing::put(update_exam).delete(delete_exam))
        .route_layer(middleware::from_fn_with_state(state, require_school));

    read.merge(manage)
}
