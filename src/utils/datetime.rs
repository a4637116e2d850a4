use chrono::{DateTime, Utc};

/// Renders a stored RFC3339 timestamp as a short date, e.g. "2026-08-27".
/// Falls back to the raw string if it does not parse.
pub fn format_date_label(rfc3339: &str) -> String {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => rfc3339.to_string(),
    }
}

/// RFC3339 cutoff for "records newer than `days` days".
pub fn window_cutoff(days: i64) -> String {
    (Utc::now() - chrono::Duration::days(days)).to_rfc3339()
}
