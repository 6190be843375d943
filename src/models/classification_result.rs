//! Classification result models for the Attendance Classification Engine.
//!
//! This module contains the [`ClassificationResult`] type and the closed
//! [`AttendanceStatus`] code set, along with the [`AuditStep`] records that
//! explain how a result was reached.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The attendance status a shift is recorded as.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceStatus;
///
/// let status = AttendanceStatus::UndertimeMoreThanHour;
/// assert_eq!(status.code(), "undertime_more_than_hour");
/// assert_eq!(serde_json::to_string(&status).unwrap(), "\"undertime_more_than_hour\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Arrived within tolerance and left on or after the scheduled end.
    OnTime,
    /// Arrived late, within the grace period.
    Tardy,
    /// Arrived later than the grace period allows.
    HalfDayAbsence,
    /// Left up to an hour before the scheduled end.
    Undertime,
    /// Left more than an hour before the scheduled end.
    UndertimeMoreThanHour,
    /// No punches at all.
    NoCallNoShow,
    /// Clock-out recorded without a clock-in.
    FailedBioIn,
    /// Clock-in recorded without a clock-out.
    FailedBioOut,
}

impl AttendanceStatus {
    /// Returns the snake_case status code.
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::OnTime => "on_time",
            AttendanceStatus::Tardy => "tardy",
            AttendanceStatus::HalfDayAbsence => "half_day_absence",
            AttendanceStatus::Undertime => "undertime",
            AttendanceStatus::UndertimeMoreThanHour => "undertime_more_than_hour",
            AttendanceStatus::NoCallNoShow => "no_call_no_show",
            AttendanceStatus::FailedBioIn => "failed_bio_in",
            AttendanceStatus::FailedBioOut => "failed_bio_out",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single step in the audit trace recording a classification decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The outcome of classifying one shift.
///
/// Magnitude fields are populated only when the matching condition was
/// detected. `tardy_minutes` is also set for half-day absences, since both
/// come from the same arrival lateness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The shift date that was classified.
    pub shift_date: NaiveDate,
    /// Primary status.
    pub status: AttendanceStatus,
    /// Secondary status for compound conditions.
    pub secondary_status: Option<AttendanceStatus>,
    /// Minutes late past the scheduled start.
    pub tardy_minutes: Option<u64>,
    /// Minutes short of the scheduled end.
    pub undertime_minutes: Option<u64>,
    /// Minutes past the scheduled end, once above the overtime threshold.
    pub overtime_minutes: Option<u64>,
    /// Anchored scheduled start, when a schedule was present.
    pub scheduled_start: Option<NaiveDateTime>,
    /// Anchored scheduled end, when a schedule was present.
    pub scheduled_end: Option<NaiveDateTime>,
    /// Hours between the two punches, when both are present and ordered.
    pub worked_hours: Option<Decimal>,
    /// Explanation for audit and display.
    pub reason: String,
    /// The engine stages that produced this result.
    pub audit_trace: Vec<AuditStep>,
}

impl ClassificationResult {
    /// Returns true if a secondary status annotates the primary one.
    pub fn has_secondary(&self) -> bool {
        self.secondary_status.is_some()
    }

    /// Returns true for statuses that count as an absence.
    pub fn is_absence(&self) -> bool {
        matches!(
            self.status,
            AttendanceStatus::NoCallNoShow | AttendanceStatus::HalfDayAbsence
        )
    }

    /// Returns the primary code, followed by the secondary code if any.
    pub fn status_codes(&self) -> Vec<&'static str> {
        std::iter::once(self.status)
            .chain(self.secondary_status)
            .map(|s| s.code())
            .collect()
    }
}
