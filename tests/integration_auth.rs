mod common;

use axum::http::StatusCode;
use common::{create_test_school, generate_unique_email, json_request, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_school_login_success(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass123").await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schools/login",
            None,
            Some(json!({
                "email": school.email,
                "password": school.password
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body.get("access_token").is_some());
    assert_eq!(body["role"], "SCHOOL");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_school_login_wrong_password(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass123").await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schools/login",
            None,
            Some(json!({
                "email": school.email,
                "password": "wrongpass"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_school_then_login(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schools/register",
            None,
            Some(json!({
                "name": "Hilltop Academy",
                "owner_name": "Jo Owner",
                "email": email,
                "password": "supersecret1"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schools/login",
            None,
            Some(json!({
                "email": email,
                "password": "supersecret1"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass123").await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schools/register",
            None,
            Some(json!({
                "name": "Copycat Academy",
                "owner_name": "Jo Owner",
                "email": school.email,
                "password": "supersecret1"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_invalid_email_format(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schools/register",
            None,
            Some(json!({
                "name": "Hilltop Academy",
                "owner_name": "Jo Owner",
                "email": "not-an-email",
                "password": "supersecret1"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verify_otp_without_issue_fails(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schools/verify-otp",
            None,
            Some(json!({
                "email": generate_unique_email(),
                "otp": "123456"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_profile_without_password(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass123").await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/schools/me",
            Some(&school.token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], school.email);
    assert!(body.get("password").is_none());
}
