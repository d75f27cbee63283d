//! Schedules module.
//!
//! Time-slot bookings for a class. The service enforces the overlap guard:
//! within one school, no two bookings for the same class may intersect on
//! the half-open interval `[start_time, end_time)`.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
