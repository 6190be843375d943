//! Status composition.
//!
//! This module folds the schedule anchor, arrival and departure verdicts into
//! the final (primary, secondary) status pair, and exposes [`classify`] as the
//! engine's single entry point.
//!
//! Precedence, first match wins:
//!
//! | Arrival | Departure | Primary | Secondary |
//! |---|---|---|---|
//! | none | none | `no_call_no_show` | - |
//! | none | any | `failed_bio_in` | - |
//! | present, no schedule | none | `failed_bio_out` | - |
//! | present, no schedule | any | `on_time` | - |
//! | half-day | none | `half_day_absence` | `failed_bio_out` |
//! | tardy | none | `tardy` | `failed_bio_out` |
//! | on time | none | `failed_bio_out` | - |
//! | half-day | any | `half_day_absence` | undertime bucket, if any |
//! | tardy | any | `tardy` | undertime bucket, if any |
//! | on time | undertime | undertime bucket | - |
//! | on time | other | `on_time` | - |

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::ClassificationPolicy;
use crate::error::EngineResult;
use crate::models::{AttendanceStatus, AuditStep, ClassificationResult, PunchPair, ShiftSchedule};

use super::arrival::{ArrivalVerdict, evaluate_arrival};
use super::departure::{
    DepartureVerdict, UNDERTIME_LONG_FORM_THRESHOLD_MINUTES, evaluate_departure,
};
use super::schedule_anchor::{AnchoredShift, anchor_schedule};

/// The status pair and magnitudes chosen for a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Primary status.
    pub status: AttendanceStatus,
    /// Secondary status for compound conditions.
    pub secondary_status: Option<AttendanceStatus>,
    /// Minutes late, for tardy and half-day arrivals.
    pub tardy_minutes: Option<u64>,
    /// Minutes short, for undertime departures.
    pub undertime_minutes: Option<u64>,
    /// Minutes of overtime, when above the threshold.
    pub overtime_minutes: Option<u64>,
    /// Explanation mentioning the magnitudes above.
    pub reason: String,
}

impl Composition {
    fn bare(status: AttendanceStatus, reason: &str) -> Self {
        Self {
            status,
            secondary_status: None,
            tardy_minutes: None,
            undertime_minutes: None,
            overtime_minutes: None,
            reason: reason.to_string(),
        }
    }
}

/// Composes the final status from scheduled arrival and departure verdicts.
///
/// A missing clock-in short-circuits to `no_call_no_show` or `failed_bio_in`
/// and discards any departure magnitudes.
///
/// # Examples
///
/// ```
/// use attendance_engine::classification::{ArrivalVerdict, DepartureVerdict, compose_status};
/// use attendance_engine::models::AttendanceStatus;
///
/// let composed = compose_status(
///     ArrivalVerdict::Tardy { minutes: 10 },
///     DepartureVerdict::UndertimeMoreThanHour { minutes: 90 },
///     15,
/// );
/// assert_eq!(composed.status, AttendanceStatus::Tardy);
/// assert_eq!(composed.secondary_status, Some(AttendanceStatus::UndertimeMoreThanHour));
/// assert_eq!(composed.tardy_minutes, Some(10));
/// assert_eq!(composed.undertime_minutes, Some(90));
/// ```
pub fn compose_status(
    arrival: ArrivalVerdict,
    departure: DepartureVerdict,
    grace_period_minutes: u32,
) -> Composition {
    use AttendanceStatus::*;

    let (status, secondary_status) = match (arrival, departure) {
        (ArrivalVerdict::NoData, DepartureVerdict::NoData) => {
            return Composition::bare(NoCallNoShow, "No clock-in or clock-out recorded");
        }
        (ArrivalVerdict::NoData, _) => {
            return Composition::bare(FailedBioIn, "Clock-out recorded with no clock-in");
        }
        (ArrivalVerdict::HalfDayEligible { .. }, DepartureVerdict::NoData) => {
            (HalfDayAbsence, Some(FailedBioOut))
        }
        (ArrivalVerdict::Tardy { .. }, DepartureVerdict::NoData) => (Tardy, Some(FailedBioOut)),
        (ArrivalVerdict::OnTime, DepartureVerdict::NoData) => (FailedBioOut, None),
        (ArrivalVerdict::HalfDayEligible { .. }, d) => (HalfDayAbsence, d.undertime_status()),
        (ArrivalVerdict::Tardy { .. }, d) => (Tardy, d.undertime_status()),
        (ArrivalVerdict::OnTime, d) => (d.undertime_status().unwrap_or(OnTime), None),
    };

    Composition {
        status,
        secondary_status,
        tardy_minutes: arrival.minutes_late(),
        undertime_minutes: departure.undertime_minutes(),
        overtime_minutes: departure.overtime_minutes(),
        reason: describe(arrival, departure, grace_period_minutes),
    }
}

/// Composes the status for a shift with no schedule.
///
/// Timing cannot be judged, so an arrival with a departure falls back to
/// `on_time`.
pub fn compose_unscheduled(has_time_in: bool, has_time_out: bool) -> Composition {
    match (has_time_in, has_time_out) {
        (false, false) => Composition::bare(
            AttendanceStatus::NoCallNoShow,
            "No clock-in or clock-out recorded",
        ),
        (false, true) => Composition::bare(
            AttendanceStatus::FailedBioIn,
            "Clock-out recorded with no clock-in",
        ),
        (true, false) => Composition::bare(
            AttendanceStatus::FailedBioOut,
            "No schedule assigned and no clock-out recorded",
        ),
        (true, true) => Composition::bare(
            AttendanceStatus::OnTime,
            "No schedule assigned; defaulting to on time",
        ),
    }
}

fn describe(arrival: ArrivalVerdict, departure: DepartureVerdict, grace_period_minutes: u32) -> String {
    let arrival_part = match arrival {
        ArrivalVerdict::NoData => "No clock-in recorded".to_string(),
        ArrivalVerdict::OnTime => "Arrived on time".to_string(),
        ArrivalVerdict::Tardy { minutes } => format!(
            "Arrived {} late, within the {}-minute grace period",
            minutes_phrase(minutes),
            grace_period_minutes
        ),
        ArrivalVerdict::HalfDayEligible { minutes } => format!(
            "Arrived {} late, past the {}-minute grace period",
            minutes_phrase(minutes),
            grace_period_minutes
        ),
    };

    let departure_part = match departure {
        DepartureVerdict::NoData => "no clock-out recorded".to_string(),
        DepartureVerdict::Regular => "left as scheduled".to_string(),
        DepartureVerdict::Undertime { minutes } => {
            format!("left {} early", minutes_phrase(minutes))
        }
        DepartureVerdict::UndertimeMoreThanHour { minutes } => {
            format!("left {} early, more than an hour short", minutes_phrase(minutes))
        }
        DepartureVerdict::Overtime { minutes } => format!(
            "stayed {} past the scheduled end (overtime)",
            minutes_phrase(minutes)
        ),
    };

    format!("{}; {}", arrival_part, departure_part)
}

fn minutes_phrase(minutes: u64) -> String {
    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", minutes)
    }
}

/// Collects audit steps in order.
#[derive(Debug, Default)]
struct AuditRecorder {
    steps: Vec<AuditStep>,
}

impl AuditRecorder {
    fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn record_anchor(&mut self, schedule: &ShiftSchedule, shift_date: NaiveDate, anchored: &AnchoredShift) {
        let reasoning = if schedule.shift_type.is_night() {
            format!(
                "Night shift: scheduled end rolled onto {}",
                anchored.scheduled_end.date()
            )
        } else if anchored.overnight {
            format!(
                "Scheduled end {} is not after start {}: rolled onto {}",
                schedule.scheduled_time_out.format("%H:%M"),
                schedule.scheduled_time_in.format("%H:%M"),
                anchored.scheduled_end.date()
            )
        } else {
            format!("Shift starts and ends on {}", shift_date)
        };

        self.record(
            "schedule_anchor",
            "Schedule Anchoring",
            json!({
                "shift_date": shift_date.to_string(),
                "shift_type": schedule.shift_type.to_string(),
                "scheduled_time_in": schedule.scheduled_time_in.format("%H:%M").to_string(),
                "scheduled_time_out": schedule.scheduled_time_out.format("%H:%M").to_string()
            }),
            json!({
                "scheduled_start": anchored.scheduled_start.to_string(),
                "scheduled_end": anchored.scheduled_end.to_string(),
                "overnight": anchored.overnight
            }),
            reasoning,
        );
    }

    fn record_arrival(
        &mut self,
        actual_time_in: Option<NaiveDateTime>,
        anchored: &AnchoredShift,
        grace_period_minutes: u32,
        verdict: ArrivalVerdict,
    ) {
        let reasoning = match verdict {
            ArrivalVerdict::NoData => "No clock-in recorded".to_string(),
            ArrivalVerdict::OnTime => "Clock-in at or before scheduled start".to_string(),
            ArrivalVerdict::Tardy { minutes } => format!(
                "{} late is within the {}-minute grace period",
                minutes_phrase(minutes),
                grace_period_minutes
            ),
            ArrivalVerdict::HalfDayEligible { minutes } => format!(
                "{} late exceeds the {}-minute grace period",
                minutes_phrase(minutes),
                grace_period_minutes
            ),
        };

        self.record(
            "arrival_evaluation",
            "Arrival Evaluation",
            json!({
                "actual_time_in": actual_time_in.map(|t| t.to_string()),
                "scheduled_start": anchored.scheduled_start.to_string(),
                "grace_period_minutes": grace_period_minutes
            }),
            json!({
                "verdict": verdict.code(),
                "minutes_late": verdict.minutes_late()
            }),
            reasoning,
        );
    }

    fn record_departure(
        &mut self,
        actual_time_out: Option<NaiveDateTime>,
        anchored: &AnchoredShift,
        policy: &ClassificationPolicy,
        verdict: DepartureVerdict,
    ) {
        let reasoning = match verdict {
            DepartureVerdict::NoData => "No clock-out recorded".to_string(),
            DepartureVerdict::Regular => format!(
                "Clock-out within {} minutes after scheduled end",
                policy.overtime_threshold_minutes
            ),
            DepartureVerdict::Undertime { minutes } => format!(
                "{} early, within {} minutes of scheduled end",
                minutes_phrase(minutes),
                UNDERTIME_LONG_FORM_THRESHOLD_MINUTES
            ),
            DepartureVerdict::UndertimeMoreThanHour { minutes } => format!(
                "{} early, more than {} minutes before scheduled end",
                minutes_phrase(minutes),
                UNDERTIME_LONG_FORM_THRESHOLD_MINUTES
            ),
            DepartureVerdict::Overtime { minutes } => format!(
                "{} after scheduled end exceeds the {}-minute overtime threshold",
                minutes_phrase(minutes),
                policy.overtime_threshold_minutes
            ),
        };

        self.record(
            "departure_evaluation",
            "Departure Evaluation",
            json!({
                "actual_time_out": actual_time_out.map(|t| t.to_string()),
                "scheduled_end": anchored.scheduled_end.to_string(),
                "overtime_threshold_minutes": policy.overtime_threshold_minutes,
                "undertime_long_form_minutes": UNDERTIME_LONG_FORM_THRESHOLD_MINUTES
            }),
            json!({
                "verdict": verdict.code(),
                "undertime_minutes": verdict.undertime_minutes(),
                "overtime_minutes": verdict.overtime_minutes()
            }),
            reasoning,
        );
    }

    fn record_composition(&mut self, composition: &Composition, punches: &PunchPair, scheduled: bool) {
        self.record(
            "status_composition",
            "Status Composition",
            json!({
                "has_schedule": scheduled,
                "has_time_in": punches.actual_time_in.is_some(),
                "has_time_out": punches.actual_time_out.is_some()
            }),
            json!({
                "status": composition.status.code(),
                "secondary_status": composition.secondary_status.map(|s| s.code())
            }),
            composition.reason.clone(),
        );
    }
}

/// Classifies a shift using the default [`ClassificationPolicy`].
///
/// See [`classify_with_policy`].
///
/// # Examples
///
/// ```
/// use attendance_engine::classification::classify;
/// use attendance_engine::models::{AttendanceStatus, ShiftSchedule, ShiftType};
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let schedule = ShiftSchedule::parse(ShiftType::Night, "22:00", "06:00", Some(15)).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
/// let time_in = NaiveDateTime::parse_from_str("2024-02-01 22:40", "%Y-%m-%d %H:%M").unwrap();
///
/// let result = classify(Some(&schedule), date, Some(time_in), None).unwrap();
/// assert_eq!(result.status, AttendanceStatus::HalfDayAbsence);
/// assert_eq!(result.secondary_status, Some(AttendanceStatus::FailedBioOut));
/// assert_eq!(result.tardy_minutes, Some(40));
/// ```
pub fn classify(
    schedule: Option<&ShiftSchedule>,
    shift_date: NaiveDate,
    actual_time_in: Option<NaiveDateTime>,
    actual_time_out: Option<NaiveDateTime>,
) -> EngineResult<ClassificationResult> {
    classify_with_policy(
        schedule,
        shift_date,
        actual_time_in,
        actual_time_out,
        &ClassificationPolicy::default(),
    )
}

/// Classifies a shift into an attendance status.
///
/// Missing punches and a missing schedule are classification states, not
/// errors. The call is pure: identical inputs give identical results.
///
/// # Errors
///
/// - [`crate::error::EngineError::InvalidPolicy`] if `policy` fails validation
/// - [`crate::error::EngineError::AnchorOutOfRange`] if an overnight schedule
///   cannot be rolled past `shift_date`
pub fn classify_with_policy(
    schedule: Option<&ShiftSchedule>,
    shift_date: NaiveDate,
    actual_time_in: Option<NaiveDateTime>,
    actual_time_out: Option<NaiveDateTime>,
    policy: &ClassificationPolicy,
) -> EngineResult<ClassificationResult> {
    policy.validate()?;

    let punches = PunchPair::new(shift_date, actual_time_in, actual_time_out);
    let mut audit = AuditRecorder::default();

    let (composition, anchored) = match schedule {
        Some(schedule) => {
            let anchored = anchor_schedule(schedule, shift_date).inspect_err(|e| {
                warn!(shift_date = %shift_date, error = %e, "Failed to anchor schedule");
            })?;
            audit.record_anchor(schedule, shift_date, &anchored);

            let grace_period_minutes = schedule.grace_period_or(policy.default_grace_period_minutes);
            let arrival = evaluate_arrival(actual_time_in, anchored.scheduled_start, grace_period_minutes);
            audit.record_arrival(actual_time_in, &anchored, grace_period_minutes, arrival);

            let departure = evaluate_departure(actual_time_out, anchored.scheduled_end, policy);
            audit.record_departure(actual_time_out, &anchored, policy, departure);

            (
                compose_status(arrival, departure, grace_period_minutes),
                Some(anchored),
            )
        }
        None => (
            compose_unscheduled(actual_time_in.is_some(), actual_time_out.is_some()),
            None,
        ),
    };
    audit.record_composition(&composition, &punches, anchored.is_some());

    debug!(
        shift_date = %shift_date,
        status = %composition.status,
        secondary_status = ?composition.secondary_status,
        tardy_minutes = ?composition.tardy_minutes,
        undertime_minutes = ?composition.undertime_minutes,
        overtime_minutes = ?composition.overtime_minutes,
        "Classified shift"
    );

    Ok(ClassificationResult {
        shift_date,
        status: composition.status,
        secondary_status: composition.secondary_status,
        tardy_minutes: composition.tardy_minutes,
        undertime_minutes: composition.undertime_minutes,
        overtime_minutes: composition.overtime_minutes,
        scheduled_start: anchored.map(|a| a.scheduled_start),
        scheduled_end: anchored.map(|a| a.scheduled_end),
        worked_hours: punches.worked_hours(),
        reason: composition.reason,
        audit_trace: audit.steps,
    })
}

/// Classifies a [`PunchPair`] against an optional schedule.
pub fn classify_punches(
    schedule: Option<&ShiftSchedule>,
    punches: &PunchPair,
    policy: &ClassificationPolicy,
) -> EngineResult<ClassificationResult> {
    classify_with_policy(
        schedule,
        punches.shift_date,
        punches.actual_time_in,
        punches.actual_time_out,
        policy,
    )
}
