//! Schools module.
//!
//! The school is the tenant account. This module owns the public
//! registration flow (send-otp, verify-otp, register), login, and the
//! school's own profile.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
