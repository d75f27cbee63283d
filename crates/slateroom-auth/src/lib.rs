//! # Slateroom Auth
//!
//! Authentication building blocks for the Slateroom API:
//!
//! - [`claims`]: JWT claim structure carrying the caller's identity, role,
//!   and tenant (school) scope
//! - [`jwt`]: access-token creation and verification
//! - [`otp`]: in-memory one-time-passcode store gating school registration
//!
//! Token parsing lives here exclusively; route handlers only ever consume
//! the decoded [`Claims`].

pub mod claims;
pub mod jwt;
pub mod otp;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use otp::OtpStore;
