//! Configuration types for attendance classification.
//!
//! This module contains the strongly-typed policy that is deserialized from
//! YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::classification::{DEFAULT_GRACE_PERIOD_MINUTES, DEFAULT_OVERTIME_THRESHOLD_MINUTES};
use crate::error::{EngineError, EngineResult};

/// The thresholds every classification call runs against.
///
/// `overtime_threshold_minutes` has no serde default: a policy file must
/// state it explicitly. Unknown keys are rejected. The undertime long-form
/// bucket is fixed at
/// [`UNDERTIME_LONG_FORM_THRESHOLD_MINUTES`](crate::classification::UNDERTIME_LONG_FORM_THRESHOLD_MINUTES)
/// and is not part of the policy.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ClassificationPolicy;
///
/// let policy = ClassificationPolicy::default();
/// assert_eq!(policy.default_grace_period_minutes, 15);
/// assert_eq!(policy.overtime_threshold_minutes, 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationPolicy {
    /// Grace period applied when a schedule carries none of its own.
    #[serde(default = "default_grace_period")]
    pub default_grace_period_minutes: u32,
    /// Minutes past the scheduled end before a departure counts as overtime.
    pub overtime_threshold_minutes: u32,
}

fn default_grace_period() -> u32 {
    DEFAULT_GRACE_PERIOD_MINUTES
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            default_grace_period_minutes: DEFAULT_GRACE_PERIOD_MINUTES,
            overtime_threshold_minutes: DEFAULT_OVERTIME_THRESHOLD_MINUTES,
        }
    }
}

impl ClassificationPolicy {
    /// Rejects an overtime threshold of zero.
    pub fn validate(&self) -> EngineResult<()> {
        if self.overtime_threshold_minutes == 0 {
            return Err(EngineError::InvalidPolicy {
                field: "overtime_threshold_minutes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
