use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_school;
use crate::state::AppState;

use super::controller::{
    delete_teacher, get_teacher, list_teachers, login, register_teacher, update_teacher,
};

/// Routes: POST /login (public); POST /register, GET /, GET /{id},
/// PATCH /{id}, DELETE /{id} (School role).
pub fn init_teachers_router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/login", post(login));

    let protected = Router::new()
        .route("/register", post(register_teacher))
        .route("/", get(list_teachers))
        .route(
            "/{id}",
            get(get_teacher).patch(update_teacher).delete(delete_teacher),
        )
        .route_layer(middleware::from_fn_with_state(state, require_school));

    public.merge(protected)
}
