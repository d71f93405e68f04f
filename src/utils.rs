/// Timestamp formatting for event output
use time::{format_description, OffsetDateTime};

const EVENT_TIME_FORMAT: &str = "[day].[month].[year] - [hour]:[minute]:[second]";

/// Format a timestamp for event lines
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    format_description::parse(EVENT_TIME_FORMAT)
        .ok()
        .and_then(|format| dt.format(&format).ok())
        .unwrap_or_else(|| dt.to_string())
}
