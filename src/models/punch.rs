//! Biometric punch model.
//!
//! A [`PunchPair`] holds the clock-in and clock-out recorded against a
//! single shift date. Grouping raw device logs into pairs happens upstream.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::time_input::{parse_optional_timestamp, parse_shift_date};

/// The clock-in and clock-out recorded for a shift date.
///
/// Either punch may be missing. The clock-out may fall on the calendar day
/// after the shift date for overnight shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchPair {
    /// The shift's nominal date.
    pub shift_date: NaiveDate,
    /// Actual clock-in, if recorded.
    #[serde(default)]
    pub actual_time_in: Option<NaiveDateTime>,
    /// Actual clock-out, if recorded.
    #[serde(default)]
    pub actual_time_out: Option<NaiveDateTime>,
}

impl PunchPair {
    /// Creates a punch pair from chrono values.
    pub fn new(
        shift_date: NaiveDate,
        actual_time_in: Option<NaiveDateTime>,
        actual_time_out: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            shift_date,
            actual_time_in,
            actual_time_out,
        }
    }

    /// Creates a punch pair from raw strings.
    ///
    /// Blank punch strings are treated as missing punches; malformed ones fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::PunchPair;
    ///
    /// let punches = PunchPair::parse("2024-02-01", Some("2024-02-01T22:40"), None).unwrap();
    /// assert!(punches.actual_time_out.is_none());
    ///
    /// assert!(PunchPair::parse("2024-02-01", Some("late"), None).is_err());
    /// ```
    pub fn parse(
        shift_date: &str,
        actual_time_in: Option<&str>,
        actual_time_out: Option<&str>,
    ) -> EngineResult<Self> {
        Ok(Self::new(
            parse_shift_date(shift_date)?,
            parse_optional_timestamp(actual_time_in)?,
            parse_optional_timestamp(actual_time_out)?,
        ))
    }

    /// Returns true if neither punch was recorded.
    pub fn is_empty(&self) -> bool {
        self.actual_time_in.is_none() && self.actual_time_out.is_none()
    }

    /// Returns the hours elapsed between clock-in and clock-out.
    ///
    /// `None` when either punch is missing or the clock-out precedes the
    /// clock-in.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::PunchPair;
    /// use rust_decimal::Decimal;
    ///
    /// let punches = PunchPair::parse(
    ///     "2024-01-15",
    ///     Some("2024-01-15T22:00"),
    ///     Some("2024-01-16T06:30"),
    /// ).unwrap();
    /// assert_eq!(punches.worked_hours(), Some(Decimal::new(85, 1))); // 8.5
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        let (time_in, time_out) = (self.actual_time_in?, self.actual_time_out?);
        let minutes = (time_out - time_in).num_minutes();
        if minutes < 0 {
            return None;
        }
        Some(Decimal::new(minutes, 0) / Decimal::new(60, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_full_pair() {
        let punches =
            PunchPair::parse("2024-01-15", Some("2024-01-15T09:20"), Some("2024-01-15T17:00"))
                .unwrap();
        assert_eq!(punches.shift_date, make_date("2024-01-15"));
        assert_eq!(
            punches.actual_time_in,
            Some(make_datetime("2024-01-15", "09:20"))
        );
        assert_eq!(
            punches.actual_time_out,
            Some(make_datetime("2024-01-15", "17:00"))
        );
    }

    #[test]
    fn test_parse_rejects_bad_shift_date() {
        assert!(matches!(
            PunchPair::parse("15/01/2024", None, None),
            Err(EngineError::InvalidShiftDate { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_punch() {
        assert!(matches!(
            PunchPair::parse("2024-01-15", None, Some("2024-01-15T17:99")),
            Err(EngineError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_is_empty() {
        let empty = PunchPair::new(make_date("2024-01-15"), None, None);
        assert!(empty.is_empty());

        let out_only = PunchPair::new(
            make_date("2024-01-15"),
            None,
            Some(make_datetime("2024-01-15", "17:00")),
        );
        assert!(!out_only.is_empty());
    }

    #[test]
    fn test_worked_hours_day_shift() {
        let punches = PunchPair::new(
            make_date("2024-01-15"),
            Some(make_datetime("2024-01-15", "09:00")),
            Some(make_datetime("2024-01-15", "17:00")),
        );
        assert_eq!(punches.worked_hours(), Some(Decimal::new(8, 0)));
    }

    #[test]
    fn test_worked_hours_missing_punch_is_none() {
        let punches = PunchPair::new(
            make_date("2024-01-15"),
            Some(make_datetime("2024-01-15", "09:00")),
            None,
        );
        assert_eq!(punches.worked_hours(), None);
    }

    #[test]
    fn test_worked_hours_reversed_punches_is_none() {
        let punches = PunchPair::new(
            make_date("2024-01-15"),
            Some(make_datetime("2024-01-15", "17:00")),
            Some(make_datetime("2024-01-15", "09:00")),
        );
        assert_eq!(punches.worked_hours(), None);
    }

    #[test]
    fn test_punch_pair_deserialization() {
        let json = r#"{
            "shift_date": "2024-02-01",
            "actual_time_in": "2024-02-01T22:40:00"
        }"#;
        let punches: PunchPair = serde_json::from_str(json).unwrap();
        assert_eq!(
            punches.actual_time_in,
            Some(make_datetime("2024-02-01", "22:40"))
        );
        assert_eq!(punches.actual_time_out, None);
    }
}
