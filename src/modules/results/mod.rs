//! Results module.
//!
//! Result sheets are uploaded in bulk, once per exam. A second upload for
//! the same exam is rejected rather than merged.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
