use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_school, require_school_or_teacher};
use crate::state::AppState;

use super::controller::{
    delete_student, get_student, list_students, login, register_student, update_student,
};

/// Routes: POST /login (public); GET /, GET /{id} (School or Teacher);
/// POST /register, PATCH /{id}, DELETE /{id} (School role).
pub fn init_students_router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/login", post(login));

    let read = Router::new()
        .route("/", get(list_students))
        .route("/{id}", get(get_student))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let manage = Router::new()
        .route("/register", post(register_student))
        .route("/{id}", axum::routing::patch(update_student).delete(delete_student))
        .route_layer(middleware::from_fn_with_state(state, require_school));

    public.merge(read).merge(manage)
}
