mod common;

use axum::http::StatusCode;
use common::{create_test_roster, json_request, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_token_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request("GET", "/api/teachers", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_garbage_token_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/teachers",
            Some("not-a-real-token"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_list_teachers(pool: PgPool) {
    let roster = create_test_roster(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/teachers",
            Some(&roster.student_token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_cannot_create_class(pool: PgPool) {
    let roster = create_test_roster(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/classes",
            Some(&roster.teacher_token),
            Some(json!({
                "class_text": "Grade 6",
                "class_num": 6
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_can_mark_attendance_route(pool: PgPool) {
    let roster = create_test_roster(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/attendance/mark",
            Some(&roster.teacher_token),
            Some(json!({
                "class_id": roster.class_id,
                "date": "2026-09-07",
                "entries": [
                    { "student_id": roster.student_id, "status": "Present" }
                ]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_reads_own_fees_but_not_all(pool: PgPool) {
    let roster = create_test_roster(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/fees/my",
            Some(&roster.student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/fees",
            Some(&roster.student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
