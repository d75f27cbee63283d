//! Students module.
//!
//! School-managed student roster plus the student login endpoint.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
