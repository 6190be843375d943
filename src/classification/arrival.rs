//! Arrival evaluation.
//!
//! Classifies the lateness of a clock-in against the anchored scheduled
//! start and the grace period.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::schedule_anchor::floor_minutes_between;

/// Grace period applied when neither the schedule nor the policy sets one.
pub const DEFAULT_GRACE_PERIOD_MINUTES: u32 = 15;

/// The outcome of comparing a clock-in to the scheduled start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ArrivalVerdict {
    /// No clock-in was recorded.
    NoData,
    /// Arrived at or before the scheduled start.
    OnTime,
    /// Late by 1 to `grace` minutes inclusive.
    Tardy {
        /// Minutes late.
        minutes: u64,
    },
    /// Late by more than the grace period.
    HalfDayEligible {
        /// Minutes late.
        minutes: u64,
    },
}

impl ArrivalVerdict {
    /// Returns the minutes late for tardy and half-day verdicts.
    pub fn minutes_late(&self) -> Option<u64> {
        match self {
            ArrivalVerdict::Tardy { minutes } | ArrivalVerdict::HalfDayEligible { minutes } => {
                Some(*minutes)
            }
            ArrivalVerdict::NoData | ArrivalVerdict::OnTime => None,
        }
    }

    /// Returns a short identifier for audit output.
    pub fn code(&self) -> &'static str {
        match self {
            ArrivalVerdict::NoData => "no_data",
            ArrivalVerdict::OnTime => "on_time",
            ArrivalVerdict::Tardy { .. } => "tardy",
            ArrivalVerdict::HalfDayEligible { .. } => "half_day_eligible",
        }
    }
}

/// Evaluates a clock-in against the scheduled start.
///
/// Lateness is `floor((actual_time_in - scheduled_start) / 1 minute)`.
/// Exactly `grace_period_minutes` late is still tardy; one minute more is
/// half-day eligible.
///
/// # Examples
///
/// ```
/// use attendance_engine::classification::{evaluate_arrival, ArrivalVerdict};
/// use chrono::NaiveDateTime;
///
/// let at = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let start = at("2024-01-15 09:00");
///
/// assert_eq!(evaluate_arrival(None, start, 15), ArrivalVerdict::NoData);
/// assert_eq!(evaluate_arrival(Some(at("2024-01-15 08:55")), start, 15), ArrivalVerdict::OnTime);
/// assert_eq!(
///     evaluate_arrival(Some(at("2024-01-15 09:15")), start, 15),
///     ArrivalVerdict::Tardy { minutes: 15 }
/// );
/// assert_eq!(
///     evaluate_arrival(Some(at("2024-01-15 09:16")), start, 15),
///     ArrivalVerdict::HalfDayEligible { minutes: 16 }
/// );
/// ```
pub fn evaluate_arrival(
    actual_time_in: Option<NaiveDateTime>,
    scheduled_start: NaiveDateTime,
    grace_period_minutes: u32,
) -> ArrivalVerdict {
    let Some(time_in) = actual_time_in else {
        return ArrivalVerdict::NoData;
    };

    let diff = floor_minutes_between(scheduled_start, time_in);
    if diff <= 0 {
        return ArrivalVerdict::OnTime;
    }

    let minutes = diff.unsigned_abs();
    if minutes > u64::from(grace_period_minutes) {
        ArrivalVerdict::HalfDayEligible { minutes }
    } else {
        ArrivalVerdict::Tardy { minutes }
    }
}
