//! Assignments module.
//!
//! Students only see assignments for their own class whose deadline has
//! not passed yet.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
