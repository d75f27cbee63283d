//! # Slateroom Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS configuration
//! - [`email`]: SMTP configuration for OTP delivery
//! - [`rate_limit`]: rate limiting for the public auth endpoints

pub mod cors;
pub mod email;
pub mod jwt;
pub mod rate_limit;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
