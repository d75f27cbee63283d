//! Configuration re-exports.
//!
//! All configuration lives in the `slateroom-config` crate; this module
//! re-exports it so application code can use `crate::config::JwtConfig`.

pub use slateroom_config::{CorsConfig, EmailConfig, JwtConfig, RateLimitConfig};
