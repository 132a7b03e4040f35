//! Destination factory — the registry entry the host analytics client uses
//! to stamp out adapters for this destination.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use engage_core::config::{DestinationConfig, ENVIRONMENT_ID_KEY};

use crate::adapter::EventAdapter;
use crate::client::EngagementClient;
use crate::host::HostApplication;

/// Registry key the host uses to route destination settings here.
pub const DESTINATION_KEY: &str = "Engage";

/// Factory trait the host's destination registry consumes.
pub trait DestinationFactory: Send + Sync {
    /// Registry key for this destination.
    fn key(&self) -> &'static str;

    /// Build an adapter for one destination configuration. Construction
    /// never fails outward; invalid settings yield an inert adapter.
    fn create(&self, settings: &serde_json::Value, host: &dyn HostApplication) -> EventAdapter;
}

/// Factory holding the process-wide engagement client handle.
pub struct EngageFactory {
    client: Arc<dyn EngagementClient>,
}

impl EngageFactory {
    pub fn new(client: Arc<dyn EngagementClient>) -> Self {
        Self { client }
    }
}

impl DestinationFactory for EngageFactory {
    fn key(&self) -> &'static str {
        DESTINATION_KEY
    }

    fn create(&self, settings: &serde_json::Value, host: &dyn HostApplication) -> EventAdapter {
        EventAdapter::create(settings, host, Arc::clone(&self.client))
    }
}

/// Preflight check for destination settings, with contextual errors for the
/// host's configuration tooling. [`EventAdapter::create`] applies the same
/// rules but degrades to an inert adapter instead of failing.
pub fn validate_settings(settings: &serde_json::Value) -> Result<()> {
    let config = DestinationConfig::from_settings(settings)
        .context("destination settings must be a JSON object")?;
    config.environment_id().map_err(|_| {
        anyhow!(
            "settings key '{}' must be a non-empty string",
            ENVIRONMENT_ID_KEY
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::recording_client;
    use crate::host::InProcessHost;

    #[test]
    fn test_factory_key() {
        let factory = EngageFactory::new(recording_client());
        assert_eq!(factory.key(), "Engage");
    }

    #[test]
    fn test_factory_builds_ready_adapter() {
        let factory = EngageFactory::new(recording_client());
        let host = InProcessHost::new("com.example.app");
        let adapter = factory.create(&serde_json::json!({ "environmentId": "env-123" }), &host);
        assert!(adapter.is_ready());
    }

    #[test]
    fn test_factory_never_fails_outward() {
        let factory = EngageFactory::new(recording_client());
        let host = InProcessHost::new("com.example.app");
        let adapter = factory.create(&serde_json::Value::Null, &host);
        assert!(!adapter.is_ready());
    }

    #[test]
    fn test_validate_settings() {
        assert!(validate_settings(&serde_json::json!({ "environmentId": "env-123" })).is_ok());

        let err = validate_settings(&serde_json::Value::Null).unwrap_err();
        assert!(err.to_string().contains("JSON object"));

        let err = validate_settings(&serde_json::json!({})).unwrap_err();
        assert!(err.to_string().contains("environmentId"));

        let err = validate_settings(&serde_json::json!({ "environmentId": "" })).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }
}
