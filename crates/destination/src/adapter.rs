//! The destination adapter — validates configuration once at construction,
//! then routes inbound messages onto the engagement client.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use engage_core::config::DestinationConfig;
use engage_core::error::{DestinationError, DestinationResult};
use engage_core::message::{
    validate_attribute_name, AttributeValue, IdentifyMessage, Message, TrackMessage,
    EMAIL_TRAIT_KEY,
};

use crate::client::{EngagementClient, EventPayload};
use crate::host::HostApplication;
use crate::screen::{ActiveScreen, ClearOnDestroy, ScreenHandle};

/// Destination adapter for the engagement SDK.
///
/// Construction decides the adapter's state exactly once: with valid
/// settings and a reachable host application it is ready and holds the
/// client handle; otherwise every dispatch is a warned no-op. There is no
/// re-configuration path.
pub struct EventAdapter {
    client: Option<Arc<dyn EngagementClient>>,
    active_screen: ActiveScreen,
}

impl EventAdapter {
    /// Build the adapter. Initialization failures are logged at error
    /// severity and produce an adapter with no client handle; they never
    /// surface to the host.
    pub fn create(
        settings: &serde_json::Value,
        host: &dyn HostApplication,
        client: Arc<dyn EngagementClient>,
    ) -> Self {
        let active_screen = ActiveScreen::new();
        match Self::init(settings, host, client.as_ref(), &active_screen) {
            Ok(()) => Self {
                client: Some(client),
                active_screen,
            },
            Err(err) => {
                error!(%err, "aborting engagement destination initialization");
                Self {
                    client: None,
                    active_screen,
                }
            }
        }
    }

    fn init(
        settings: &serde_json::Value,
        host: &dyn HostApplication,
        client: &dyn EngagementClient,
        active_screen: &ActiveScreen,
    ) -> DestinationResult<()> {
        let config = DestinationConfig::from_settings(settings)?;
        let context = host
            .application_context()
            .ok_or(DestinationError::MissingHostApplication)?;
        let environment_id = config.environment_id()?;

        client.configure(&context, environment_id);
        host.register_screen_observer(Arc::new(ClearOnDestroy::new(active_screen.clone())));
        debug!(environment_id, "engagement destination initialized");
        Ok(())
    }

    /// Whether construction produced a usable client handle.
    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    /// Route one inbound message. Every failure degrades to a logged drop;
    /// nothing propagates back into the host's event-processing path.
    ///
    /// Drops the destination cannot act on are warnings; a track message
    /// with no event name is malformed on the host side and is dropped at
    /// debug severity only.
    pub fn dispatch(&self, message: &Message) {
        let Some(client) = self.client.as_deref() else {
            let err = DestinationError::UninitializedClient;
            warn!(%err, kind = message.kind(), "dropping message");
            return;
        };
        match message {
            Message::Track(track) => self.process_track(client, track),
            Message::Identify(identify) => self.process_identify(client, identify),
            other => {
                let err = DestinationError::InvalidMessageKind(other.kind().to_string());
                warn!(%err, "dropping message");
            }
        }
    }

    fn process_track(&self, client: &dyn EngagementClient, message: &TrackMessage) {
        let Some(event) = message.event.as_deref() else {
            debug!("track message has no event name, dropping");
            return;
        };
        let payload = EventPayload {
            event: event.to_string(),
            properties: message.properties.clone(),
        };
        // A foregrounded screen switches to the inline-presentation variant.
        match self.active_screen.current() {
            Some(screen) => client.track_and_present(payload, &screen),
            None => client.track(payload),
        }
    }

    fn process_identify(&self, client: &dyn EngagementClient, message: &IdentifyMessage) {
        if let Some(user_id) = message.user_id.as_deref() {
            client.set_user_identifier(user_id);
        }
        self.forward_attributes(client, &message.traits);
    }

    /// Forward a trait map as visitor attributes. The email trait goes to
    /// the dedicated setter exactly once and is excluded from generic
    /// forwarding; every other entry passes the name and value gates or is
    /// dropped with a warning.
    fn forward_attributes(
        &self,
        client: &dyn EngagementClient,
        traits: &HashMap<String, serde_json::Value>,
    ) {
        if let Some(value) = traits.get(EMAIL_TRAIT_KEY) {
            match value.as_str() {
                Some(email) => client.set_email_address(email),
                None => {
                    let err = DestinationError::InvalidPropertyValue {
                        value: value.to_string(),
                    };
                    warn!(%err, "dropping email trait");
                }
            }
        }
        for (name, value) in traits {
            if name == EMAIL_TRAIT_KEY {
                continue;
            }
            if let Err(err) = validate_attribute_name(name) {
                warn!(%err, "dropping visitor attribute");
                continue;
            }
            match AttributeValue::from_json(value) {
                Ok(attribute) => client.set_visitor_attribute(name, attribute),
                Err(err) => warn!(%err, "dropping visitor attribute"),
            }
        }
    }

    /// Log the current session out of the engagement SDK. No-op when the
    /// adapter never initialized.
    pub fn reset(&self) {
        if let Some(client) = self.client.as_deref() {
            client.logout();
        }
    }

    /// Raw client handle for advanced host use. `None` when initialization
    /// was aborted.
    pub fn underlying(&self) -> Option<Arc<dyn EngagementClient>> {
        self.client.clone()
    }

    /// Update the foregrounded-screen reference from the host's lifecycle
    /// path.
    pub fn set_active_screen(&self, screen: Option<ScreenHandle>) {
        self.active_screen.set(screen);
    }

    /// Currently tracked screen, if any.
    pub fn active_screen(&self) -> Option<ScreenHandle> {
        self.active_screen.current()
    }
}
