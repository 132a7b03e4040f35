//! Destination configuration — the settings object the host's control plane
//! supplies once at adapter construction. Immutable thereafter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DestinationError, DestinationResult};

/// Canonical settings key for the engagement environment identifier.
pub const ENVIRONMENT_ID_KEY: &str = "environmentId";

/// Typed view of the destination settings object. Keys are camelCase on the
/// wire; unrecognized keys are preserved untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationConfig {
    /// Engagement environment identifier. Required, non-empty.
    pub environment_id: String,
    /// Remaining destination settings, passed through as-is.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl DestinationConfig {
    /// Parse the host-supplied settings value. Absent, null, or non-object
    /// settings are rejected before any field validation runs.
    pub fn from_settings(settings: &serde_json::Value) -> DestinationResult<Self> {
        if !settings.is_object() {
            return Err(DestinationError::MissingConfiguration);
        }
        serde_json::from_value(settings.clone())
            .map_err(|_| DestinationError::MissingConfiguration)
    }

    /// The validated environment identifier.
    pub fn environment_id(&self) -> DestinationResult<&str> {
        if self.environment_id.is_empty() {
            return Err(DestinationError::InvalidEnvironmentId);
        }
        Ok(&self.environment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_settings() {
        let settings = serde_json::json!({ "environmentId": "env-123" });
        let config = DestinationConfig::from_settings(&settings).unwrap();
        assert_eq!(config.environment_id().unwrap(), "env-123");
    }

    #[test]
    fn test_extra_keys_preserved() {
        let settings = serde_json::json!({
            "environmentId": "env-123",
            "enableDebug": true,
        });
        let config = DestinationConfig::from_settings(&settings).unwrap();
        assert_eq!(config.extra["enableDebug"], serde_json::json!(true));
    }

    #[test]
    fn test_absent_settings_rejected() {
        assert!(matches!(
            DestinationConfig::from_settings(&serde_json::Value::Null),
            Err(DestinationError::MissingConfiguration)
        ));
        assert!(matches!(
            DestinationConfig::from_settings(&serde_json::json!("env-123")),
            Err(DestinationError::MissingConfiguration)
        ));
    }

    #[test]
    fn test_missing_or_empty_environment_id() {
        let config = DestinationConfig::from_settings(&serde_json::json!({})).unwrap();
        assert!(matches!(
            config.environment_id(),
            Err(DestinationError::InvalidEnvironmentId)
        ));

        let config =
            DestinationConfig::from_settings(&serde_json::json!({ "environmentId": "" })).unwrap();
        assert!(matches!(
            config.environment_id(),
            Err(DestinationError::InvalidEnvironmentId)
        ));
    }
}
