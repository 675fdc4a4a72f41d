//! Display Formatting
//!
//! Text rendering shared by the CLI and the web frontend: relative times,
//! game lengths, grouped numbers and board timestamps.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// "N minutes ago" below an hour, "N hours ago" below a day, else "N days ago"
///
/// Timestamps in the future render as zero minutes.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - then).num_milliseconds().max(0);

    let (count, unit) = if diff_ms < HOUR_MS {
        (diff_ms / MINUTE_MS, "minute")
    } else if diff_ms < DAY_MS {
        (diff_ms / HOUR_MS, "hour")
    } else {
        (diff_ms / DAY_MS, "day")
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Game length as `Mm Ss`
pub fn game_length(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Integer with comma thousands separators (`1234567` → `1,234,567`)
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Board list/detail timestamp: `YYYY-MM-DD HH:MM`
pub fn post_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Compact board date for narrow layouts: `YYYY-MM-DD`
pub fn post_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Match date in detail rows: `MM-DD HH:MM`
pub fn match_date(at: DateTime<Utc>) -> String {
    at.format("%m-%d %H:%M").to_string()
}

/// Parse a timestamp as sent by the stats service
///
/// Accepts RFC 3339 and zone-less ISO 8601 (taken as UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}
