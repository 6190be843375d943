//! Attendance record model used by the bulk workflows.

use serde::{Deserialize, Serialize};

use super::{PunchPair, ShiftSchedule};

/// One employee's shift awaiting classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Caller-side record identifier, echoed back in reports.
    pub id: String,
    /// The rostered schedule, if the employee had one for this date.
    #[serde(default)]
    pub schedule: Option<ShiftSchedule>,
    /// The punches recorded for the shift date.
    pub punches: PunchPair,
}

impl AttendanceRecord {
    /// Creates a record.
    pub fn new(id: impl Into<String>, schedule: Option<ShiftSchedule>, punches: PunchPair) -> Self {
        Self {
            id: id.into(),
            schedule,
            punches,
        }
    }
}
