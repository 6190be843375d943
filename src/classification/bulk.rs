//! Bulk classification and verification.
//!
//! A bulk status change applies one proposed status to many records at once.
//! [`verify_bulk_status`] recomputes each record independently and reports
//! which ones disagree with the proposal.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ClassificationPolicy;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceStatus, ClassificationResult};

use super::status_composer::classify_punches;

/// A record whose computed status differs from the proposed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMismatch {
    /// The record identifier.
    pub record_id: String,
    /// The status the bulk action wanted to apply.
    pub proposed: AttendanceStatus,
    /// The status the engine computed.
    pub computed: AttendanceStatus,
    /// The engine's explanation for the computed status.
    pub reason: String,
}

/// A record that could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    /// The record identifier.
    pub record_id: String,
    /// The validation error message.
    pub message: String,
}

/// The outcome of checking a bulk status change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkVerificationReport {
    /// Ids of records whose computed status matches the proposal.
    pub consistent: Vec<String>,
    /// Records whose computed status differs.
    pub mismatches: Vec<StatusMismatch>,
    /// Records that failed validation.
    pub failures: Vec<RecordFailure>,
}

impl BulkVerificationReport {
    /// Returns true if every record matched the proposal.
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty() && self.failures.is_empty()
    }
}

/// Classifies each record independently, preserving input order.
///
/// One record failing validation does not affect the others.
pub fn classify_batch(
    records: &[AttendanceRecord],
    policy: &ClassificationPolicy,
) -> Vec<(String, EngineResult<ClassificationResult>)> {
    records
        .iter()
        .map(|record| {
            let result = classify_punches(record.schedule.as_ref(), &record.punches, policy);
            (record.id.clone(), result)
        })
        .collect()
}

/// Checks a proposed bulk status against what each record computes to.
///
/// Only the primary status is compared.
///
/// # Examples
///
/// ```
/// use attendance_engine::classification::verify_bulk_status;
/// use attendance_engine::config::ClassificationPolicy;
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus, PunchPair};
///
/// let records = vec![
///     AttendanceRecord::new("a", None, PunchPair::parse("2024-01-15", None, None).unwrap()),
///     AttendanceRecord::new(
///         "b",
///         None,
///         PunchPair::parse("2024-01-15", Some("2024-01-15T09:00"), None).unwrap(),
///     ),
/// ];
///
/// let report = verify_bulk_status(&records, AttendanceStatus::NoCallNoShow, &ClassificationPolicy::default());
/// assert_eq!(report.consistent, vec!["a".to_string()]);
/// assert_eq!(report.mismatches[0].computed, AttendanceStatus::FailedBioOut);
/// assert!(!report.is_consistent());
/// ```
pub fn verify_bulk_status(
    records: &[AttendanceRecord],
    proposed: AttendanceStatus,
    policy: &ClassificationPolicy,
) -> BulkVerificationReport {
    let mut report = BulkVerificationReport::default();

    for (record_id, result) in classify_batch(records, policy) {
        match result {
            Ok(classification) if classification.status == proposed => {
                report.consistent.push(record_id);
            }
            Ok(classification) => report.mismatches.push(StatusMismatch {
                record_id,
                proposed,
                computed: classification.status,
                reason: classification.reason,
            }),
            Err(e) => {
                warn!(record_id = %record_id, error = %e, "Record failed classification");
                report.failures.push(RecordFailure {
                    record_id,
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        proposed = %proposed,
        records = records.len(),
        consistent = report.consistent.len(),
        mismatches = report.mismatches.len(),
        failures = report.failures.len(),
        "Verified bulk status change"
    );

    report
}
