//! Classes module.
//!
//! A class is the unit students enroll into and schedules book against.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
