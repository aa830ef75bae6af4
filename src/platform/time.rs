//! Wall clock access

use chrono::{Local, Utc};

/// Milliseconds since the Unix epoch
pub fn now_ms() -> f64 {
    Utc::now().timestamp_millis() as f64
}

/// Local calendar date for leaderboard entries
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
