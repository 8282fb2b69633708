use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Current Unix timestamp in seconds
///
/// Validation never reads the clock itself; callers pass this (or any other
/// instant) as `now`.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs() as i64
}
