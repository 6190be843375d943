//! Shift schedule model and related types.
//!
//! This module defines the [`ShiftSchedule`] an employee is rostered on and
//! the closed [`ShiftType`] enumeration.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::time_input::parse_wall_clock;

/// The rostered shift category.
///
/// Only [`ShiftType::Night`] forces an overnight rollover on its own; every
/// other type is anchored purely by comparing its start and end clock times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Morning shift.
    Morning,
    /// Afternoon shift.
    Afternoon,
    /// Evening shift.
    Evening,
    /// Night shift, always treated as ending on the following day.
    Night,
    /// Graveyard shift.
    Graveyard,
    /// Round-the-clock utility shift.
    #[serde(rename = "utility_24h")]
    Utility24h,
    /// No shift type recorded.
    #[default]
    Unspecified,
}

impl ShiftType {
    /// Returns true if this type always rolls over midnight.
    pub fn is_night(&self) -> bool {
        matches!(self, ShiftType::Night)
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftType::Morning => "morning",
            ShiftType::Afternoon => "afternoon",
            ShiftType::Evening => "evening",
            ShiftType::Night => "night",
            ShiftType::Graveyard => "graveyard",
            ShiftType::Utility24h => "utility_24h",
            ShiftType::Unspecified => "unspecified",
        };
        f.write_str(name)
    }
}

/// The schedule an employee is rostered on for a shift.
///
/// Times are wall-clock values with no date; the classification engine
/// alone decides which calendar day each one lands on.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ShiftSchedule, ShiftType};
///
/// let schedule = ShiftSchedule::parse(ShiftType::Morning, "09:00", "17:00", Some(15)).unwrap();
/// assert_eq!(schedule.grace_period_or(10), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSchedule {
    /// The shift category.
    #[serde(default)]
    pub shift_type: ShiftType,
    /// Scheduled clock-in time.
    #[serde(with = "wall_clock_format")]
    pub scheduled_time_in: NaiveTime,
    /// Scheduled clock-out time.
    #[serde(with = "wall_clock_format")]
    pub scheduled_time_out: NaiveTime,
    /// Minutes of tolerance after the scheduled start. Falls back to the
    /// policy default when absent.
    #[serde(default)]
    pub grace_period_minutes: Option<u32>,
    /// Site identifier, carried through untouched.
    #[serde(default)]
    pub site_id: Option<String>,
    /// Campaign identifier, carried through untouched.
    #[serde(default)]
    pub campaign_id: Option<String>,
}

impl ShiftSchedule {
    /// Creates a schedule from already-validated clock times.
    pub fn new(
        shift_type: ShiftType,
        scheduled_time_in: NaiveTime,
        scheduled_time_out: NaiveTime,
        grace_period_minutes: Option<u32>,
    ) -> Self {
        Self {
            shift_type,
            scheduled_time_in,
            scheduled_time_out,
            grace_period_minutes,
            site_id: None,
            campaign_id: None,
        }
    }

    /// Creates a schedule from `HH:MM` strings.
    ///
    /// Fails with [`crate::error::EngineError::InvalidTime`] when either time
    /// is malformed or out of range.
    pub fn parse(
        shift_type: ShiftType,
        scheduled_time_in: &str,
        scheduled_time_out: &str,
        grace_period_minutes: Option<u32>,
    ) -> EngineResult<Self> {
        Ok(Self::new(
            shift_type,
            parse_wall_clock(scheduled_time_in)?,
            parse_wall_clock(scheduled_time_out)?,
            grace_period_minutes,
        ))
    }

    /// Returns the schedule's grace period, or `default` if none is set.
    pub fn grace_period_or(&self, default: u32) -> u32 {
        self.grace_period_minutes.unwrap_or(default)
    }
}

/// Serde adapter storing clock times as `HH:MM`, or `HH:MM:SS` when the
/// seconds are non-zero.
mod wall_clock_format {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::models::time_input::parse_wall_clock;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if time.second() == 0 { "%H:%M" } else { "%H:%M:%S" };
        serializer.serialize_str(&time.format(format).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_wall_clock(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_parse_valid_schedule() {
        let schedule = ShiftSchedule::parse(ShiftType::Morning, "09:00", "17:00", None).unwrap();
        assert_eq!(schedule.scheduled_time_in, hm(9, 0));
        assert_eq!(schedule.scheduled_time_out, hm(17, 0));
        assert_eq!(schedule.grace_period_minutes, None);
        assert_eq!(schedule.site_id, None);
    }

    #[test]
    fn test_parse_rejects_bad_time_out() {
        let result = ShiftSchedule::parse(ShiftType::Night, "22:00", "06:75", Some(15));
        match result {
            Err(EngineError::InvalidTime { value, .. }) => assert_eq!(value, "06:75"),
            other => panic!("Expected InvalidTime, got {:?}", other),
        }
    }

    #[test]
    fn test_grace_period_falls_back_to_default() {
        let without = ShiftSchedule::new(ShiftType::Morning, hm(9, 0), hm(17, 0), None);
        let with = ShiftSchedule::new(ShiftType::Morning, hm(9, 0), hm(17, 0), Some(5));
        assert_eq!(without.grace_period_or(15), 15);
        assert_eq!(with.grace_period_or(15), 5);
    }

    #[test]
    fn test_only_night_type_is_night() {
        assert!(ShiftType::Night.is_night());
        assert!(!ShiftType::Graveyard.is_night());
        assert!(!ShiftType::Utility24h.is_night());
        assert!(!ShiftType::Unspecified.is_night());
    }

    #[test]
    fn test_shift_type_serialization() {
        assert_eq!(serde_json::to_string(&ShiftType::Night).unwrap(), "\"night\"");
        assert_eq!(
            serde_json::to_string(&ShiftType::Utility24h).unwrap(),
            "\"utility_24h\""
        );
        let parsed: ShiftType = serde_json::from_str("\"graveyard\"").unwrap();
        assert_eq!(parsed, ShiftType::Graveyard);
        assert_eq!(ShiftType::Utility24h.to_string(), "utility_24h");
    }

    #[test]
    fn test_schedule_deserialization() {
        let json = r#"{
            "shift_type": "night",
            "scheduled_time_in": "22:00",
            "scheduled_time_out": "06:00",
            "campaign_id": "camp-7"
        }"#;

        let schedule: ShiftSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.shift_type, ShiftType::Night);
        assert_eq!(schedule.scheduled_time_in, hm(22, 0));
        assert_eq!(schedule.scheduled_time_out, hm(6, 0));
        assert_eq!(schedule.grace_period_minutes, None);
        assert_eq!(schedule.campaign_id.as_deref(), Some("camp-7"));
    }

    #[test]
    fn test_schedule_deserialization_rejects_bad_time() {
        let json = r#"{"scheduled_time_in": "25:00", "scheduled_time_out": "06:00"}"#;
        assert!(serde_json::from_str::<ShiftSchedule>(json).is_err());
    }

    #[test]
    fn test_schedule_serializes_times_as_hh_mm() {
        let schedule = ShiftSchedule::new(ShiftType::Evening, hm(14, 30), hm(23, 0), Some(10));
        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["scheduled_time_in"], "14:30");
        assert_eq!(value["scheduled_time_out"], "23:00");
        assert_eq!(value["shift_type"], "evening");
    }

    #[test]
    fn test_schedule_keeps_seconds_through_serialization() {
        let schedule = ShiftSchedule::parse(ShiftType::Morning, "09:00:45", "17:00", Some(0)).unwrap();
        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["scheduled_time_in"], "09:00:45");
        assert_eq!(value["scheduled_time_out"], "17:00");

        let reloaded: ShiftSchedule = serde_json::from_value(value).unwrap();
        assert_eq!(reloaded, schedule);
    }
}
