//! Domain records persisted by the services.
//!
//! # Invariants
//! - Users and notes are identified by UUID v4 values that are never reused.
//! - Timestamps are Unix epoch milliseconds.

pub mod note;
pub mod user;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in epoch milliseconds.
///
/// A clock set before 1970 reads as `0`.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
