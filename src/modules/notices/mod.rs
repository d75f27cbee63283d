//! Notices module.
//!
//! The noticeboard only shows the trailing 7 days. Teachers and students
//! see notices addressed to everyone plus those addressed to their role.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
