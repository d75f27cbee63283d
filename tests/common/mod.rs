use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use sqlx::PgPool;
use uuid::Uuid;

use slateroom::config::{CorsConfig, EmailConfig, JwtConfig, RateLimitConfig};
use slateroom::router::init_router;
use slateroom::state::AppState;
use slateroom_auth::{OtpStore, create_access_token};
use slateroom_core::hash_password;
use slateroom_models::UserRole;
use slateroom_models::ids::{ClassId, SchoolId, StudentId, SubjectId, TeacherId};

#[allow(dead_code)]
pub async fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        otp_store: Arc::new(OtpStore::new()),
    };
    init_router(state)
}

#[allow(dead_code)]
pub async fn setup_test_app_with_rate_limit(
    pool: PgPool,
    rate_limit_config: RateLimitConfig,
) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config,
        otp_store: Arc::new(OtpStore::new()),
    };
    init_router(state)
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.edu", Uuid::new_v4())
}

/// Build a JSON request. The rate limiter keys on peer IP, so every
/// request carries a `ConnectInfo` extension the way a served connection
/// would.
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let body = match body {
        Some(value) => Body::from(serde_json::to_string(&value).unwrap()),
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

#[allow(dead_code)]
pub struct TestSchool {
    pub id: SchoolId,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Insert a school account and mint a token for it.
#[allow(dead_code)]
pub async fn create_test_school(pool: &PgPool, password: &str) -> TestSchool {
    let email = generate_unique_email();
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, SchoolId>(
        r#"INSERT INTO schools (name, owner_name, email, password)
           VALUES ('Test School', 'Owner', $1, $2)
           RETURNING id"#,
    )
    .bind(&email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_access_token(
        id.0,
        &email,
        "Test School",
        id,
        UserRole::School,
        &JwtConfig::from_env(),
    )
    .unwrap();

    TestSchool {
        id,
        email,
        password: password.to_string(),
        token,
    }
}

#[allow(dead_code)]
pub struct TestRoster {
    pub school: TestSchool,
    pub teacher_id: TeacherId,
    pub teacher_token: String,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub student_id: StudentId,
    pub student_token: String,
}

/// Seed a school with one teacher, one class, one subject, and one
/// enrolled student, plus tokens for each role.
#[allow(dead_code)]
pub async fn create_test_roster(pool: &PgPool) -> TestRoster {
    let school = create_test_school(pool, "schoolpass123").await;
    let jwt_config = JwtConfig::from_env();

    let teacher_email = generate_unique_email();
    let teacher_id = sqlx::query_scalar::<_, TeacherId>(
        r#"INSERT INTO teachers (school_id, name, email, qualification, age, gender, password)
           VALUES ($1, 'Teacher', $2, 'BSc', 30, 'Female', $3)
           RETURNING id"#,
    )
    .bind(school.id)
    .bind(&teacher_email)
    .bind(hash_password("teachpass123").unwrap())
    .fetch_one(pool)
    .await
    .unwrap();

    let class_id = sqlx::query_scalar::<_, ClassId>(
        r#"INSERT INTO classes (school_id, class_text, class_num)
           VALUES ($1, 'Grade 5', 5) RETURNING id"#,
    )
    .bind(school.id)
    .fetch_one(pool)
    .await
    .unwrap();

    let subject_id = sqlx::query_scalar::<_, SubjectId>(
        r#"INSERT INTO subjects (school_id, subject_name, subject_code)
           VALUES ($1, 'Math', 'MATH-101') RETURNING id"#,
    )
    .bind(school.id)
    .fetch_one(pool)
    .await
    .unwrap();

    let student_email = generate_unique_email();
    let student_id = sqlx::query_scalar::<_, StudentId>(
        r#"INSERT INTO students (school_id, class_id, name, email, age, gender, guardian, guardian_phone, password)
           VALUES ($1, $2, 'Student', $3, 10, 'Female', 'Guardian', '555-0100', $4)
           RETURNING id"#,
    )
    .bind(school.id)
    .bind(class_id)
    .bind(&student_email)
    .bind(hash_password("studpass123").unwrap())
    .fetch_one(pool)
    .await
    .unwrap();

    let teacher_token = create_access_token(
        teacher_id.0,
        &teacher_email,
        "Teacher",
        school.id,
        UserRole::Teacher,
        &jwt_config,
    )
    .unwrap();

    let student_token = create_access_token(
        student_id.0,
        &student_email,
        "Student",
        school.id,
        UserRole::Student,
        &jwt_config,
    )
    .unwrap();

    TestRoster {
        school,
        teacher_id,
        teacher_token,
        class_id,
        subject_id,
        student_id,
        student_token,
    }
}
