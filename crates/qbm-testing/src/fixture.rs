//! Deterministic fixture primitives.
//!
//! Tests that build catalog trees by hand want stable, readable identifiers
//! and timestamps instead of fresh randomness on every run.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Deterministic UUID derived from a small index. `uuid_n(1)` is always the
/// same value, distinct from `uuid_n(2)`.
pub fn uuid_n(n: u32) -> Uuid {
    Uuid::from_u128(0x5150_0000_0000_0000_0000_0000_0000_0000u128 + n as u128)
}

/// Fixed reference instant for fixture rows.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap()
}
