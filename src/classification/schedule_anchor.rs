//! Schedule anchoring.
//!
//! Projects a schedule's wall-clock start and end onto absolute instants for
//! a specific shift date, rolling the end onto the next calendar day for
//! overnight shifts.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftSchedule, ShiftType};

/// A schedule placed on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchoredShift {
    /// Scheduled start on the shift date.
    pub scheduled_start: NaiveDateTime,
    /// Scheduled end, on the shift date or the day after.
    pub scheduled_end: NaiveDateTime,
    /// Whether the end was rolled onto the following day.
    pub overnight: bool,
}

/// Decides whether a schedule crosses midnight.
///
/// A shift is overnight when its type is [`ShiftType::Night`], or when the
/// end's (hour, minute) is less than or equal to the start's. Seconds are
/// ignored, and a zero-length schedule such as `09:00-09:00` rolls over.
///
/// # Examples
///
/// ```
/// use attendance_engine::classification::is_overnight;
/// use attendance_engine::models::ShiftType;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// assert!(is_overnight(ShiftType::Unspecified, t(22, 0), t(6, 0)));
/// assert!(is_overnight(ShiftType::Night, t(18, 0), t(23, 0)));
/// assert!(is_overnight(ShiftType::Morning, t(9, 0), t(9, 0)));
/// assert!(!is_overnight(ShiftType::Morning, t(9, 0), t(17, 0)));
/// ```
pub fn is_overnight(shift_type: ShiftType, time_in: NaiveTime, time_out: NaiveTime) -> bool {
    shift_type.is_night() || (time_out.hour(), time_out.minute()) <= (time_in.hour(), time_in.minute())
}

/// Anchors a schedule onto a shift date.
///
/// The start always lands on `shift_date`. The end lands on `shift_date`,
/// or on the following day when [`is_overnight`] holds.
///
/// # Errors
///
/// [`EngineError::AnchorOutOfRange`] when an overnight shift is dated on the
/// last representable calendar day.
///
/// # Examples
///
/// ```
/// use attendance_engine::classification::anchor_schedule;
/// use attendance_engine::models::{ShiftSchedule, ShiftType};
/// use chrono::NaiveDate;
///
/// let schedule = ShiftSchedule::parse(ShiftType::Night, "22:00", "06:00", None).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
///
/// let anchored = anchor_schedule(&schedule, date).unwrap();
/// assert!(anchored.overnight);
/// assert_eq!(anchored.scheduled_end.date(), NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
/// ```
pub fn anchor_schedule(schedule: &ShiftSchedule, shift_date: NaiveDate) -> EngineResult<AnchoredShift> {
    let overnight = is_overnight(
        schedule.shift_type,
        schedule.scheduled_time_in,
        schedule.scheduled_time_out,
    );

    let end_date = if overnight {
        shift_date
            .succ_opt()
            .ok_or(EngineError::AnchorOutOfRange { shift_date })?
    } else {
        shift_date
    };

    let anchored = AnchoredShift {
        scheduled_start: shift_date.and_time(schedule.scheduled_time_in),
        scheduled_end: end_date.and_time(schedule.scheduled_time_out),
        overnight,
    };

    trace!(
        shift_date = %shift_date,
        shift_type = %schedule.shift_type,
        scheduled_start = %anchored.scheduled_start,
        scheduled_end = %anchored.scheduled_end,
        overnight,
        "Anchored schedule"
    );

    Ok(anchored)
}

/// Whole minutes from `from` to `to`, floored.
///
/// Thirty seconds early is -1, thirty seconds late is 0.
pub(crate) fn floor_minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_seconds().div_euclid(60)
}
