mod common;

use axum::http::StatusCode;
use common::{create_test_roster, json_request, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_overlapping_booking_rejected_over_http(pool: PgPool) {
    let roster = create_test_roster(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&roster.school.token),
            Some(json!({
                "teacher_id": roster.teacher_id,
                "subject_id": roster.subject_id,
                "class_id": roster.class_id,
                "start_time": "2026-09-07T09:00:00Z",
                "end_time": "2026-09-07T10:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&roster.school.token),
            Some(json!({
                "teacher_id": roster.teacher_id,
                "subject_id": roster.subject_id,
                "class_id": roster.class_id,
                "start_time": "2026-09-07T09:30:00Z",
                "end_time": "2026-09-07T10:30:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_back_to_back_bookings_allowed_over_http(pool: PgPool) {
    let roster = create_test_roster(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&roster.school.token),
            Some(json!({
                "teacher_id": roster.teacher_id,
                "subject_id": roster.subject_id,
                "class_id": roster.class_id,
                "start_time": "2026-09-07T09:00:00Z",
                "end_time": "2026-09-07T10:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&roster.school.token),
            Some(json!({
                "teacher_id": roster.teacher_id,
                "subject_id": roster.subject_id,
                "class_id": roster.class_id,
                "start_time": "2026-09-07T10:00:00Z",
                "end_time": "2026-09-07T11:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_sees_own_timetable(pool: PgPool) {
    let roster = create_test_roster(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&roster.school.token),
            Some(json!({
                "teacher_id": roster.teacher_id,
                "subject_id": roster.subject_id,
                "class_id": roster.class_id,
                "start_time": "2026-09-07T09:00:00Z",
                "end_time": "2026-09-07T10:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/schedules/teacher",
            Some(&roster.teacher_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["subject_name"], "Math");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_create_schedule(pool: PgPool) {
    let roster = create_test_roster(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&roster.student_token),
            Some(json!({
                "teacher_id": roster.teacher_id,
                "subject_id": roster.subject_id,
                "class_id": roster.class_id,
                "start_time": "2026-09-07T09:00:00Z",
                "end_time": "2026-09-07T10:00:00Z"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
