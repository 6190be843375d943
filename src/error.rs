//! Error types for the Attendance Classification Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Missing punches and missing schedules are never errors; they are
//! classification states. Errors here cover malformed input and configuration.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Classification Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidTime {
///     value: "25:00".to_string(),
///     message: "hour must be between 0 and 23".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid wall-clock time '25:00': hour must be between 0 and 23"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A classification policy value is unusable.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The policy field that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A wall-clock time string was malformed or out of range.
    #[error("Invalid wall-clock time '{value}': {message}")]
    InvalidTime {
        /// The raw value supplied by the caller.
        value: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A shift date string was malformed.
    #[error("Invalid shift date '{value}': {message}")]
    InvalidShiftDate {
        /// The raw value supplied by the caller.
        value: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A punch timestamp string was malformed.
    #[error("Invalid punch timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The raw value supplied by the caller.
        value: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The shift date has no following calendar day to roll an overnight shift onto.
    #[error("Cannot anchor overnight shift on {shift_date}: no following calendar day")]
    AnchorOutOfRange {
        /// The shift date that could not be anchored.
        shift_date: NaiveDate,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "missing field `overtime_threshold_minutes`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': missing field `overtime_threshold_minutes`"
        );
    }

    #[test]
    fn test_invalid_policy_displays_field_and_message() {
        let error = EngineError::InvalidPolicy {
            field: "overtime_threshold_minutes".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid policy field 'overtime_threshold_minutes': must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_shift_date_displays_value() {
        let error = EngineError::InvalidShiftDate {
            value: "2024-02-30".to_string(),
            message: "input is out of range".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid shift date '2024-02-30': input is out of range"
        );
    }

    #[test]
    fn test_invalid_timestamp_displays_value() {
        let error = EngineError::InvalidTimestamp {
            value: "yesterday".to_string(),
            message: "expected YYYY-MM-DDTHH:MM".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid punch timestamp 'yesterday': expected YYYY-MM-DDTHH:MM"
        );
    }

    #[test]
    fn test_anchor_out_of_range_displays_date() {
        let error = EngineError::AnchorOutOfRange {
            shift_date: NaiveDate::MAX,
        };
        assert!(error.to_string().starts_with("Cannot anchor overnight shift on"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_time() -> EngineResult<()> {
            Err(EngineError::InvalidTime {
                value: "9am".to_string(),
                message: "expected HH:MM".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_time()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
