use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_school, require_student};
use crate::state::AppState;

use super::controller::{assign_fees, list_fees, my_fees, record_payment};

/// Routes: POST /assign, GET / (School); GET /my (Student);
/// POST /payments (gateway callback, no auth layer).
pub fn init_fees_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/assign", post(assign_fees))
        .route("/", get(list_fees))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school,
        ));

    let student = Router::new()
        .route("/my", get(my_fees))
        .route_layer(middleware::from_fn_with_state(state, require_student));

    let boundary = Router::new().route("/payments", post(record_payment));

    admin.merge(student).merge(boundary)
}
