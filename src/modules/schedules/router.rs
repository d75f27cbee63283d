use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{
    require_authenticated, require_school, require_school_or_student, require_teacher,
};
use crate::state::AppState;

use super::controller::{
    create_schedule, delete_schedule, get_schedule, list_class_schedules, list_own_schedules,
    update_schedule,
};

/// Routes: POST /, PUT /{id}, DELETE /{id} (School role);
/// GET /class/{class_id} (School or Student); GET /teacher (Teacher);
/// GET /{id} (any authenticated role).
pub fn init_schedules_router(state: AppState) -> Router<AppState> {
    let manage = Router::new()
        .route("/", post(create_schedule))
        .route(
            "/{id}",
            axum::routing::put(update_schedule).delete(delete_schedule),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let class_view = Router::new()
        .route("/class/{class_id}", get(list_class_schedules))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_student,
        ));

    let teacher_view = Router::new()
        .route("/teacher", get(list_own_schedules))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_teacher,
        ));

    let single = Router::new()
        .route("/{id}", get(get_schedule))
        .route_layer(middleware::from_fn_with_state(state, require_authenticated));

    manage.merge(class_view).merge(teacher_view).merge(single)
}
