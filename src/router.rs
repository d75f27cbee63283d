use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::assignments::router::init_assignments_router;
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::classes::router::init_classes_router;
use crate::modules::examinations::router::init_examinations_router;
use crate::modules::fees::router::init_fees_router;
use crate::modules::notices::router::init_notices_router;
use crate::modules::results::router::init_results_router;
use crate::modules::schedules::router::init_schedules_router;
use crate::modules::schools::router::init_schools_router;
use crate::modules::students::router::init_students_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/schools", init_schools_router(state.clone()))
                .nest("/teachers", init_teachers_router(state.clone()))
                .nest("/students", init_students_router(state.clone()))
                .nest("/classes", init_classes_router(state.clone()))
                .nest("/subjects", init_subjects_router(state.clone()))
                .nest("/schedules", init_schedules_router(state.clone()))
                .nest("/attendance", init_attendance_router(state.clone()))
                .nest("/examinations", init_examinations_router(state.clone()))
                .nest("/results", init_results_router(state.clone()))
                .nest("/notices", init_notices_router(state.clone()))
                .nest("/assignments", init_assignments_router(state.clone()))
                .nest("/fees", init_fees_router(state.clone())),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
