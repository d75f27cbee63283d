//! Feature modules.
//!
//! Each module follows the same layout: `model.rs` (rows and DTOs),
//! `service.rs` (business logic), `controller.rs` (HTTP handlers),
//! `router.rs` (route table).

pub mod assignments;
pub mod attendance;
pub mod classes;
pub mod examinations;
pub mod fees;
pub mod notices;
pub mod results;
pub mod schedules;
pub mod schools;
pub mod students;
pub mod subjects;
pub mod teachers;
