//! Elapsed-time and date formatting helpers
//!
//! Display-only; all arithmetic stays integer math on Unix seconds.

use chrono::DateTime;

const DAY: u64 = 86_400;
const HOUR: u64 = 3_600;
const MINUTE: u64 = 60;

/// Format a streak length as `Nd Nh Nm Ns`.
pub fn format_streak(seconds: u64) -> String {
    let days = seconds / DAY;
    let hours = (seconds % DAY) / HOUR;
    let minutes = (seconds % HOUR) / MINUTE;
    let secs = seconds % MINUTE;
    format!("{days}d {hours}h {minutes}m {secs}s")
}

/// Compact duration: `Nh Nm` when at least an hour, else `Nm`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / HOUR;
    let minutes = (seconds % HOUR) / MINUTE;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format a Unix timestamp as `Mon D, YYYY HH:MM` (UTC).
pub fn format_date(timestamp: u64) -> String {
    match DateTime::from_timestamp(timestamp as i64, 0) {
        Some(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        None => "unknown".to_string(),
    }
}
