//! # Slateroom Models
//!
//! Strongly-typed entity ids and the closed value-type enums shared between
//! the API crates.

pub mod ids;
pub mod value_types;

pub use value_types::{AttendanceStatus, FeeStatus, NoticeAudience, UserRole};
