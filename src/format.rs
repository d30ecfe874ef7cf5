//! Human-readable renderings of sizes, durations and timestamps.

use time::OffsetDateTime;
use time::macros::format_description;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

pub fn gib(bytes: i64) -> String {
    format!("{:.4} GiB", bytes as f64 / GIB)
}

pub fn mib(bytes: i64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}

/// `H h M min S s`, followed by the total in decimal days.
pub fn duration_long(secs: i64) -> String {
    let secs = secs.max(0);
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    let days = secs as f64 / 86_400.0;
    format!("{} h {} min {} s, or {:.4} days", h, m, s, days)
}

/// `H:MM:SS` for per-claim columns.
pub fn duration_short(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub fn timestamp(epoch: i64) -> String {
    let fmt = format_description!("[year]-[month]-[day]_[hour]:[minute]:[second]");
    OffsetDateTime::from_unix_timestamp(epoch)
        .ok()
        .and_then(|t| t.format(&fmt).ok())
        .unwrap_or_else(|| "0000-00-00_00:00:00".to_string())
}

/// Joins report columns with the configured separator.
pub fn columns(sep: &str, cols: &[String]) -> String {
    cols.join(&format!("{} ", sep))
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
