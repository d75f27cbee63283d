use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_school_or_teacher, require_student};
use crate::state::AppState;

use super::controller::{exam_results, my_result, upload_results};

/// Routes: POST /upload/{exam_id}, GET /exam/{exam_id} (School or Teacher);
/// GET /my/{exam_id} (Student).
pub fn init_results_router(state: AppState) -> Router<AppState> {
    let staff = Router::new()
        .route("/upload/{exam_id}", post(upload_results))
        .route("/exam/{exam_id}", get(exam_results))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let student = Router::new()
        .route("/my/{exam_id}", get(my_result))
        .route_layer(middleware::from_fn_with_state(state, require_student));

    staff.merge(student)
}
