//! Departure evaluation.
//!
//! Classifies a clock-out as early (undertime), late (overtime) or regular
//! relative to the anchored scheduled end.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::ClassificationPolicy;
use crate::models::AttendanceStatus;

use super::schedule_anchor::floor_minutes_between;

/// Minutes past the scheduled end before a departure counts as overtime.
///
/// Departures strictly later than this many minutes are overtime. Callers
/// needing another value set [`ClassificationPolicy::overtime_threshold_minutes`].
pub const DEFAULT_OVERTIME_THRESHOLD_MINUTES: u32 = 60;

/// Early departures of more than this many minutes are long-form undertime
/// ("more than an hour short"). Not configurable.
pub const UNDERTIME_LONG_FORM_THRESHOLD_MINUTES: u32 = 60;

/// The outcome of comparing a clock-out to the scheduled end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum DepartureVerdict {
    /// No clock-out was recorded.
    NoData,
    /// Left early by up to the long-form threshold.
    Undertime {
        /// Minutes short of the scheduled end.
        minutes: u64,
    },
    /// Left early by more than the long-form threshold.
    UndertimeMoreThanHour {
        /// Minutes short of the scheduled end.
        minutes: u64,
    },
    /// Stayed past the overtime threshold.
    Overtime {
        /// Minutes past the scheduled end.
        minutes: u64,
    },
    /// Left at or after the scheduled end, within the overtime threshold.
    Regular,
}

impl DepartureVerdict {
    /// Returns the undertime status this verdict maps to, if any.
    pub fn undertime_status(&self) -> Option<AttendanceStatus> {
        match self {
            DepartureVerdict::Undertime { .. } => Some(AttendanceStatus::Undertime),
            DepartureVerdict::UndertimeMoreThanHour { .. } => {
                Some(AttendanceStatus::UndertimeMoreThanHour)
            }
            _ => None,
        }
    }

    /// Returns the minutes short for undertime verdicts.
    pub fn undertime_minutes(&self) -> Option<u64> {
        match self {
            DepartureVerdict::Undertime { minutes }
            | DepartureVerdict::UndertimeMoreThanHour { minutes } => Some(*minutes),
            _ => None,
        }
    }

    /// Returns the minutes of overtime for overtime verdicts.
    pub fn overtime_minutes(&self) -> Option<u64> {
        match self {
            DepartureVerdict::Overtime { minutes } => Some(*minutes),
            _ => None,
        }
    }

    /// Returns a short identifier for audit output.
    pub fn code(&self) -> &'static str {
        match self {
            DepartureVerdict::NoData => "no_data",
            DepartureVerdict::Undertime { .. } => "undertime",
            DepartureVerdict::UndertimeMoreThanHour { .. } => "undertime_more_than_hour",
            DepartureVerdict::Overtime { .. } => "overtime",
            DepartureVerdict::Regular => "regular",
        }
    }
}

/// Evaluates a clock-out against the scheduled end.
///
/// With `diff = floor((actual_time_out - scheduled_end) / 1 minute)`:
/// - `diff < -60` is long-form undertime
/// - `-60 <= diff < 0` is undertime
/// - `diff > overtime_threshold` is overtime
/// - anything else is regular
///
/// # Examples
///
/// ```
/// use attendance_engine::classification::{evaluate_departure, DepartureVerdict};
/// use attendance_engine::config::ClassificationPolicy;
/// use chrono::NaiveDateTime;
///
/// let at = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let end = at("2024-01-15 17:00");
/// let policy = ClassificationPolicy::default();
///
/// assert_eq!(
///     evaluate_departure(Some(at("2024-01-15 16:00")), end, &policy),
///     DepartureVerdict::Undertime { minutes: 60 }
/// );
/// assert_eq!(
///     evaluate_departure(Some(at("2024-01-15 15:59")), end, &policy),
///     DepartureVerdict::UndertimeMoreThanHour { minutes: 61 }
/// );
/// assert_eq!(
///     evaluate_departure(Some(at("2024-01-15 17:30")), end, &policy),
///     DepartureVerdict::Regular
/// );
/// ```
pub fn evaluate_departure(
    actual_time_out: Option<NaiveDateTime>,
    scheduled_end: NaiveDateTime,
    policy: &ClassificationPolicy,
) -> DepartureVerdict {
    let Some(time_out) = actual_time_out else {
        return DepartureVerdict::NoData;
    };

    let diff = floor_minutes_between(scheduled_end, time_out);
    let minutes = diff.unsigned_abs();

    if diff < 0 {
        if minutes > u64::from(UNDERTIME_LONG_FORM_THRESHOLD_MINUTES) {
            DepartureVerdict::UndertimeMoreThanHour { minutes }
        } else {
            DepartureVerdict::Undertime { minutes }
        }
    } else if minutes > u64::from(policy.overtime_threshold_minutes) {
        DepartureVerdict::Overtime { minutes }
    } else {
        DepartureVerdict::Regular
    }
}
