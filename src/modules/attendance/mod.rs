//! Attendance module.
//!
//! One row per (student, date). Bulk marking skips students already marked
//! for that day rather than failing the whole batch.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
