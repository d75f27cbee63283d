//! # Slateroom API
//!
//! A multi-tenant school-management REST API built with Rust, Axum, and
//! PostgreSQL. Three client roles talk to it: School (the tenant/admin
//! account), Teacher, and Student.
//!
//! ## Overview
//!
//! - **Registration**: schools self-register behind an email OTP check
//! - **Authentication**: JWT bearer tokens for all three roles
//! - **Rosters**: classes, subjects, teachers, students, all school-scoped
//! - **Scheduling**: class bookings with an overlap guard (no double-booked
//!   time slots per class)
//! - **Day-to-day**: attendance, examinations, results, notices,
//!   assignments, fee collection
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Env-driven configuration re-exports
//! ├── middleware/       # Auth extractor and role middleware
//! ├── modules/          # Feature modules
//! │   ├── schools/     # Tenant accounts: OTP, register, login, profile
//! │   ├── teachers/    # Teacher roster + login
//! │   ├── students/    # Student roster + login
//! │   ├── classes/     # Class roster
//! │   ├── subjects/    # Subject roster
//! │   ├── schedules/   # Time-slot bookings + overlap guard
//! │   ├── attendance/  # Per-day attendance
//! │   ├── examinations/# Exam planning
//! │   ├── results/     # Per-exam result sheets
//! │   ├── notices/     # Audience-targeted notices
//! │   ├── assignments/ # Assignment metadata
//! │   └── fees/        # Fee templates, per-student fees, payment records
//! └── utils/           # Shared utilities (email)
//! ```
//!
//! Each feature module follows the same structure: `model.rs` (rows and
//! DTOs), `service.rs` (business logic), `controller.rs` (HTTP handlers),
//! `router.rs` (route table).
//!
//! ## Tenancy
//!
//! Every roster entity and booking is owned by exactly one school. The
//! authenticated token carries the caller's `school_id` and every query
//! filters on it; a record belonging to another school is indistinguishable
//! from one that does not exist.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use slateroom_auth;
pub use slateroom_config;
pub use slateroom_core;
pub use slateroom_db;
pub use slateroom_models;
