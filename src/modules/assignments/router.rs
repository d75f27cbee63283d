use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::middleware::role::{require_school, require_school_or_teacher, require_student};
use crate::state::AppState;

use super::controller::{create_assignment, delete_assignment, list_assignments, my_assignments};

/// Routes: POST /, DELETE /{id} (School or Teacher); GET / (School);
/// GET /my (Student).
pub fn init_assignments_router(state: AppState) -> Router<AppState> {
    let staff = Router::new()
        .route("/", post(create_assignment))
        .route("/{id}", delete(delete_assignment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let admin = Router::new()
        .route("/", get(list_assignments))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let student = Router::new()
        .route("/my", get(my_assignments))
        .route_layer(middleware::from_fn_with_state(state, require_student));

    staff.merge(admin).merge(student)
}
