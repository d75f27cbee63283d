use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_school_or_teacher, require_student};
use crate::state::AppState;

use super::controller::{check_taken_today, mark_attendance, my_history, student_history};

/// Routes: POST /mark, GET /student/{student_id}, GET /check/{class_id}
/// (School or Teacher); GET /my (Student).
pub fn init_attendance_router(state: AppState) -> Router<AppState> {
    let staff = Router::new()
        .route("/mark", post(mark_attendance))
        .route("/student/{student_id}", get(student_history))
        .route("/check/{class_id}", get(check_taken_today))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let student = Router::new()
        .route("/my", get(my_history))
        .route_layer(middleware::from_fn_with_state(state, require_student));

    staff.merge(student)
}
