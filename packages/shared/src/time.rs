//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_utc_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_datetime(timestamp_millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis).unwrap_or_default()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in UTC
///
/// Timestamps outside chrono's representable range fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    to_datetime(timestamp_millis).to_rfc3339()
}

/// Format the time of day of a Unix timestamp (milliseconds) as `HH:MM:SS` in UTC
pub fn timestamp_to_time_of_day(timestamp_millis: i64) -> String {
    to_datetime(timestamp_millis).format("%H:%M:%S").to_string()
}
