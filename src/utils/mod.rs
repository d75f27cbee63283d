//! Shared utilities.
//!
//! - [`email`]: SMTP delivery of registration OTP codes

pub mod email;
