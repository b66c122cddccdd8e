//! Input parsing and validation helpers.
//!
//! The HTTP layer accepts dates and times as strings; everything is parsed
//! and range-checked here before any repository call, so malformed input
//! never reaches the write paths.

use chrono::{NaiveDate, NaiveTime};

use crate::error::CoreError;

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("Invalid date '{input}'. Use YYYY-MM-DD.")))
}

/// Parse a time-of-day string, accepting `HH:MM:SS` or `HH:MM`.
pub fn parse_time(input: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| CoreError::Validation(format!("Invalid time '{input}'. Use HH:MM or HH:MM:SS.")))
}

/// Validate a weekday index (0 = Sunday .. 6 = Saturday).
pub fn validate_day_of_week(day_of_week: i32) -> Result<u8, CoreError> {
    u8::try_from(day_of_week)
        .ok()
        .filter(|d| *d <= 6)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "day_of_week must be between 0 (Sunday) and 6 (Saturday), got {day_of_week}"
            ))
        })
}

/// Validate that a slot's end time falls strictly after its start time.
pub fn validate_time_range(start_time: NaiveTime, end_time: NaiveTime) -> Result<(), CoreError> {
    if end_time > start_time {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "end_time must be after start_time".to_string(),
        ))
    }
}
