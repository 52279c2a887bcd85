//! Elapsed / duration labels

use std::time::Duration;

/// Format as `m:ss`
pub fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format fractional seconds as `m:ss`
///
/// Anything that is not a finite, non-negative number renders as `0:00`.
pub fn format_seconds(seconds: f64) -> String {
    Duration::try_from_secs_f64(seconds).map_or_else(|_| "0:00".to_string(), format_time)
}

/// Duration to whole milliseconds, saturating
pub fn as_millis_u64(time: Duration) -> u64 {
    u64::try_from(time.as_millis()).unwrap_or(u64::MAX)
}
