//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! classification policy from YAML files.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{EngineError, EngineResult};

use super::types::ClassificationPolicy;

/// Name of the policy file inside a configuration directory.
const POLICY_FILE: &str = "policy.yaml";

/// Loads and provides access to the classification policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── policy.yaml   # Grace period, overtime and undertime thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// assert_eq!(loader.policy().default_grace_period_minutes, 15);
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: ClassificationPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `policy.yaml` is missing
    /// - The file contains invalid YAML or omits `overtime_threshold_minutes`
    /// - A threshold fails [`ClassificationPolicy::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join(POLICY_FILE);
        let path_str = policy_path.display().to_string();

        let content = fs::read_to_string(&policy_path).map_err(|_| {
            warn!(path = %path_str, "Policy file not found");
            EngineError::ConfigNotFound {
                path: path_str.clone(),
            }
        })?;

        Self::from_yaml(&content, &path_str)
    }

    /// Parses a policy from YAML text.
    ///
    /// `source` names where the text came from and is used in error messages.
    pub fn from_yaml(content: &str, source: &str) -> EngineResult<Self> {
        let policy: ClassificationPolicy = serde_yaml::from_str(content).map_err(|e| {
            warn!(source = %source, error = %e, "Policy file failed to parse");
            EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            }
        })?;

        policy.validate().inspect_err(|e| {
            warn!(source = %source, error = %e, "Policy failed validation");
        })?;

        Ok(Self { policy })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy(), &ClassificationPolicy::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_yaml_with_custom_thresholds() {
        let yaml = "default_grace_period_minutes: 10\novertime_threshold_minutes: 30\n";
        let loader = ConfigLoader::from_yaml(yaml, "inline").unwrap();

        assert_eq!(loader.policy().default_grace_period_minutes, 10);
        assert_eq!(loader.policy().overtime_threshold_minutes, 30);
    }

    #[test]
    fn test_from_yaml_missing_overtime_threshold_is_parse_error() {
        let yaml = "default_grace_period_minutes: 15\n";

        match ConfigLoader::from_yaml(yaml, "inline") {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert_eq!(path, "inline");
                assert!(message.contains("overtime_threshold_minutes"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_yaml_invalid_syntax() {
        let result = ConfigLoader::from_yaml("overtime_threshold_minutes: [", "inline");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_from_yaml_rejects_zero_threshold() {
        let result = ConfigLoader::from_yaml("overtime_threshold_minutes: 0\n", "inline");
        assert!(matches!(result, Err(EngineError::InvalidPolicy { .. })));
    }

    #[test]
    fn test_from_yaml_rejects_undertime_bucket_override() {
        let yaml = "overtime_threshold_minutes: 60\nundertime_long_form_minutes: 30\n";
        match ConfigLoader::from_yaml(yaml, "inline") {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("undertime_long_form_minutes"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_default_loader_uses_default_policy() {
        assert_eq!(
            ConfigLoader::default().policy(),
            &ClassificationPolicy::default()
        );
    }
}
