//! Fees module.
//!
//! A fee template fans out one pending fee per student enrolled in the
//! class. Payments come back through a boundary endpoint the payment
//! gateway calls; it records the external reference and timestamp.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
