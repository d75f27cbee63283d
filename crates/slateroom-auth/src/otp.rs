//! In-memory one-time-passcode store gating school registration.
//!
//! Each email gets at most one live code; issuing again overwrites it. A
//! code is valid for five minutes and is consumed on its first successful
//! verification. An expired record is purged lazily by the verification
//! attempt that finds it.
//!
//! State is process-local: codes do not survive a restart, and a multi-
//! instance deployment would need an external keyed store with the same
//! issue/verify/expire contract.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Code validity window.
const OTP_TTL_MINUTES: i64 = 5;

#[derive(Debug, Clone)]
struct OtpRecord {
    code: String,
    expires_at: DateTime<Utc>,
}

/// Issues and verifies 6-digit registration codes, keyed by email.
#[derive(Debug, Default)]
pub struct OtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a code for `email` and return it for delivery.
    ///
    /// Any previously issued, still-live code for the same email is
    /// overwritten and can no longer verify.
    pub fn issue(&self, email: &str) -> String {
        self.issue_at(email, Utc::now())
    }

    /// Check `submitted` against the stored code for `email`.
    ///
    /// Returns `true` exactly once per issued code: a successful match
    /// deletes the record. A mismatch keeps the record so the user may
    /// retry until expiry. Expiry and absence are indistinguishable to the
    /// caller; both are `false`.
    pub fn verify(&self, email: &str, submitted: &str) -> bool {
        self.verify_at(email, submitted, Utc::now())
    }

    fn issue_at(&self, email: &str, now: DateTime<Utc>) -> String {
        let code = rand::thread_rng().gen_range(100_000..=999_999).to_string();

        let mut records = self.records.lock().expect("otp store lock poisoned");
        records.insert(
            email.to_string(),
            OtpRecord {
                code: code.clone(),
                expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
            },
        );

        code
    }

    fn verify_at(&self, email: &str, submitted: &str, now: DateTime<Utc>) -> bool {
        let mut records = self.records.lock().expect("otp store lock poisoned");

        let Some(record) = records.get(email) else {
            return false;
        };

        if now > record.expires_at {
            records.remove(email);
            return false;
        }

        let is_valid = record.code == submitted;
        if is_valid {
            records.remove(email);
        }
        is_valid
    }
}
