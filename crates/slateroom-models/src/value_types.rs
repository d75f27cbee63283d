//! Closed value-type enums stored as text columns.
//!
//! Role is deliberately a closed tagged set: authorization decisions compare
//! enum variants, never raw strings from the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The three account roles. `School` is the tenant/admin account; Teacher
/// and Student accounts belong to a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    School,
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::School => "SCHOOL",
            Self::Teacher => "TEACHER",
            Self::Student => "STUDENT",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHOOL" => Ok(Self::School),
            "TEACHER" => Ok(Self::Teacher),
            "STUDENT" => Ok(Self::Student),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Who a notice is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum NoticeAudience {
    All,
    Student,
    Teacher,
}

impl NoticeAudience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Student => "STUDENT",
            Self::Teacher => "TEACHER",
        }
    }
}

/// Per-day attendance outcome for one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Lifecycle of a single student fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Pending,
    Paid,
    Failed,
}
