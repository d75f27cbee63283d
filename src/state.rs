use std::sync::Arc;

use sqlx::PgPool;

use slateroom_auth::OtpStore;
use slateroom_config::{CorsConfig, EmailConfig, JwtConfig, RateLimitConfig};
use slateroom_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    /// Registration OTP codes, process-local.
    pub otp_store: Arc<OtpStore>,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        otp_store: Arc::new(OtpStore::new()),
    }
}
