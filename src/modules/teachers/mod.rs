//! Teachers module.
//!
//! School-managed teacher roster plus the teacher login endpoint.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
