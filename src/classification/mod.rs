//! Classification logic for the Attendance Classification Engine.
//!
//! This module contains the four engine stages: schedule anchoring
//! (including overnight rollover), arrival evaluation against the grace
//! period, departure evaluation for undertime and overtime, and status
//! composition. Bulk helpers classify and verify many records at once.

mod arrival;
mod bulk;
mod departure;
mod schedule_anchor;
mod status_composer;

pub use arrival::{ArrivalVerdict, DEFAULT_GRACE_PERIOD_MINUTES, evaluate_arrival};
pub use bulk::{
    BulkVerificationReport, RecordFailure, StatusMismatch, classify_batch, verify_bulk_status,
};
pub use departure::{
    DEFAULT_OVERTIME_THRESHOLD_MINUTES, DepartureVerdict, UNDERTIME_LONG_FORM_THRESHOLD_MINUTES,
    evaluate_departure,
};
pub use schedule_anchor::{AnchoredShift, anchor_schedule, is_overnight};
pub use status_composer::{
    Composition, classify, classify_punches, classify_with_policy, compose_status,
    compose_unscheduled,
};
