use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use slateroom_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::schools::model::{
    LoginDto, LoginResponse, MessageResponse, RegisterSchoolDto, School, SchoolListEntry,
    SendOtpDto, UpdateSchoolDto, VerifyOtpDto,
};
use crate::modules::schools::service::SchoolService;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::ValidatedJson;

/// Issue a registration OTP and email it
#[utoipa::path(
    post,
    path = "/api/schools/send-otp",
    summary = "Send registration OTP",
    request_body = SendOtpDto,
    responses(
        (status = 200, description = "OTP sent", body = MessageResponse),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid email"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn send_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SendOtpDto>,
) -> Result<Json<MessageResponse>, AppError> {
    if SchoolService::email_registered(&state.db, &dto.email).await? {
        return Err(AppError::conflict(anyhow::anyhow!(
            "A school with this email already exists"
        )));
    }

    let code = state.otp_store.issue(&dto.email);

    EmailService::new(state.email_config.clone())
        .send_registration_otp(&dto.email, &code)
        .await?;

    Ok(Json(MessageResponse {
        message: "OTP sent to email".to_string(),
    }))
}

/// Verify a registration OTP
#[utoipa::path(
    post,
    path = "/api/schools/verify-otp",
    summary = "Verify registration OTP",
    request_body = VerifyOtpDto,
    responses(
        (status = 200, description = "OTP verified", body = MessageResponse),
        (status = 400, description = "Invalid or expired OTP"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyOtpDto>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.otp_store.verify(&dto.email, &dto.otp) {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Invalid or expired OTP"
        )));
    }

    Ok(Json(MessageResponse {
        message: "OTP verified".to_string(),
    }))
}

/// Register a new school account
#[utoipa::path(
    post,
    path = "/api/schools/register",
    summary = "Register school",
    request_body = RegisterSchoolDto,
    responses(
        (status = 201, description = "School registered", body = School),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation failed"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterSchoolDto>,
) -> Result<(StatusCode, Json<School>), AppError> {
    let school = SchoolService::register_school(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(school)))
}

/// Log in as a school account
#[utoipa::path(
    post,
    path = "/api/schools/login",
    summary = "School login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = SchoolService::login(&state.db, &state.jwt_config, dto).await?;

    Ok(Json(response))
}

/// Get the calling school's profile
#[utoipa::path(
    get,
    path = "/api/schools/me",
    summary = "Get own school profile",
    responses(
        (status = 200, description = "School profile", body = School),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<School>, AppError> {
    let school = SchoolService::get_school(&state.db, auth_user.school_id()).await?;

    Ok(Json(school))
}

/// Update the calling school's profile
#[utoipa::path(
    patch,
    path = "/api/schools/me",
    summary = "Update own school profile",
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "School updated", body = School),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateSchoolDto>,
) -> Result<Json<School>, AppError> {
    let school = SchoolService::update_school(&state.db, auth_user.school_id(), dto).await?;

    Ok(Json(school))
}

/// List all schools (id + name) for the login page
#[utoipa::path(
    get,
    path = "/api/schools/all",
    summary = "List schools",
    responses(
        (status = 200, description = "School list", body = [SchoolListEntry])
    ),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn all_schools(
    State(state): State<AppState>,
) -> Result<Json<Vec<SchoolListEntry>>, AppError> {
    let schools = SchoolService::list_schools(&state.db).await?;

    Ok(Json(schools))
}
