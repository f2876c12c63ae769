use crate::parsers::deserializers::parse_timestamp;

/// Format a timestamp as a 12-hour time of day: "2:05:09 PM".
/// Unparseable input is returned unchanged.
pub fn format_time_of_day(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%-I:%M:%S %p").to_string(),
        None => raw.to_string(),
    }
}

/// Format a timestamp as a calendar date: "January 05, 2025".
/// Unparseable input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%B %d, %Y").to_string(),
        None => raw.to_string(),
    }
}
