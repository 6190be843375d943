//! Core data models for the Attendance Classification Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod classification_result;
mod punch;
mod record;
mod schedule;
mod time_input;

pub use classification_result::{AttendanceStatus, AuditStep, ClassificationResult};
pub use punch::PunchPair;
pub use record::AttendanceRecord;
pub use schedule::{ShiftSchedule, ShiftType};
pub use time_input::{parse_optional_timestamp, parse_shift_date, parse_timestamp, parse_wall_clock};
