//! Conversions between the wire date format (`YYYY-MM-DD` strings) and the
//! stored format (Unix seconds).
//!
//! The conversion policy is fixed to UTC in both directions: a calendar date
//! becomes the timestamp of its midnight in UTC, and a timestamp becomes the
//! UTC calendar date it falls on. Time-of-day is not preserved; transaction
//! dates round-trip at day precision only.
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::Error;

/// The wire format for transaction dates.
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse an ISO-8601 calendar date string (`YYYY-MM-DD`).
///
/// # Errors
/// Returns [Error::InvalidInput] if `text` is not a valid calendar date in
/// the expected format. Parse failures are client errors.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|_| {
        Error::InvalidInput(format!(
            "Invalid transaction date '{text}', expected YYYY-MM-DD"
        ))
    })
}

/// Render a calendar date as a `YYYY-MM-DD` string.
///
/// # Errors
/// Returns [Error::DateConversion] if formatting fails, which indicates a
/// bug rather than bad input.
pub fn date_to_string(date: Date) -> Result<String, Error> {
    date.format(DATE_FORMAT)
        .map_err(|error| Error::DateConversion(error.to_string()))
}

/// Convert a calendar date to the Unix timestamp of its midnight in UTC.
pub fn date_to_unix_seconds(date: Date) -> i64 {
    PrimitiveDateTime::new(date, Time::MIDNIGHT)
        .assume_utc()
        .unix_timestamp()
}

/// Convert a stored Unix timestamp back to the UTC calendar date it falls on.
///
/// # Errors
/// Returns [Error::DateConversion] if `seconds` is outside the range the
/// `time` crate can represent.
pub fn unix_seconds_to_date(seconds: i64) -> Result<Date, Error> {
    OffsetDateTime::from_unix_timestamp(seconds)
        .map(|datetime| datetime.date())
        .map_err(|error| Error::DateConversion(error.to_string()))
}
