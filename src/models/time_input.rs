//! Parsing of caller-supplied date and time strings.
//!
//! Review screens and import previews hand the engine raw strings. These
//! helpers turn them into chrono values or fail with a validation error;
//! they never guess and never clamp out-of-range components.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// Accepted wall-clock layouts, tried in order.
const WALL_CLOCK_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Accepted punch timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// Single-digit hours (`9:05`) are accepted. Hours must be 0-23, minutes and
/// seconds 0-59; leap seconds are rejected.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::parse_wall_clock;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_wall_clock("22:00").unwrap(), NaiveTime::from_hms_opt(22, 0, 0).unwrap());
/// assert!(parse_wall_clock("24:00").is_err());
/// assert!(parse_wall_clock("9am").is_err());
/// ```
pub fn parse_wall_clock(value: &str) -> EngineResult<NaiveTime> {
    parse_wall_clock_inner(value).inspect_err(|e| {
        warn!(value = %value, error = %e, "Rejected wall-clock time");
    })
}

fn parse_wall_clock_inner(value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();
    let mut last_error = None;
    for format in WALL_CLOCK_FORMATS {
        match NaiveTime::parse_from_str(trimmed, format) {
            // %S accepts 60 as a leap second.
            Ok(time) if time.nanosecond() >= 1_000_000_000 => {
                return Err(invalid_time(value, "second must be between 0 and 59"));
            }
            Ok(time) => return Ok(time),
            Err(e) => last_error = Some(e),
        }
    }

    let message = match last_error {
        Some(e) => format!("expected HH:MM or HH:MM:SS: {}", e),
        None => "expected HH:MM or HH:MM:SS".to_string(),
    };
    Err(invalid_time(value, &message))
}

fn invalid_time(value: &str, message: &str) -> EngineError {
    EngineError::InvalidTime {
        value: value.to_string(),
        message: message.to_string(),
    }
}

/// Parses a shift date in `YYYY-MM-DD` form.
pub fn parse_shift_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        warn!(value = %value, error = %e, "Rejected shift date");
        EngineError::InvalidShiftDate {
            value: value.to_string(),
            message: e.to_string(),
        }
    })
}

/// Parses a punch timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]` and the same with a space in place of `T`.
pub fn parse_timestamp(value: &str) -> EngineResult<NaiveDateTime> {
    let trimmed = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            warn!(value = %value, "Rejected punch timestamp");
            EngineError::InvalidTimestamp {
                value: value.to_string(),
                message: "expected YYYY-MM-DDTHH:MM or YYYY-MM-DDTHH:MM:SS".to_string(),
            }
        })
}

/// Parses an optional punch timestamp, treating blank strings as absent.
pub fn parse_optional_timestamp(value: Option<&str>) -> EngineResult<Option<NaiveDateTime>> {
    match value {
        Some(s) if !s.trim().is_empty() => parse_timestamp(s).map(Some),
        _ => Ok(None),
    }
}
