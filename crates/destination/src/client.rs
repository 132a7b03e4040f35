//! Outbound seam — the engagement-SDK client trait and the capture/no-op
//! implementations used by tests and disabled destinations.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use engage_core::message::AttributeValue;

use crate::host::AppContext;
use crate::screen::ScreenHandle;

/// Event payload forwarded to the engagement SDK: the event name and the
/// property map, unchanged from the inbound track message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub event: String,
    pub properties: HashMap<String, serde_json::Value>,
}

/// Client handle into the engagement SDK.
///
/// All calls are synchronous pass-throughs; the SDK's own failure handling
/// is opaque to this layer, so nothing here returns a result.
pub trait EngagementClient: Send + Sync {
    /// Initialize the SDK for the given host context and environment.
    fn configure(&self, context: &AppContext, environment_id: &str);

    /// Fire-and-forget event tracking.
    fn track(&self, payload: EventPayload);

    /// Track and present any triggered engagement content inline on the
    /// given screen.
    fn track_and_present(&self, payload: EventPayload, screen: &ScreenHandle);

    /// Set the session's user identifier.
    fn set_user_identifier(&self, user_id: &str);

    /// Set the visitor's email address.
    fn set_email_address(&self, email: &str);

    /// Store a visitor attribute against the user profile.
    fn set_visitor_attribute(&self, name: &str, value: AttributeValue);

    /// End the current engagement session.
    fn logout(&self);
}

/// No-op client for hosts that disable the destination.
pub struct NoOpClient;

impl EngagementClient for NoOpClient {
    fn configure(&self, _context: &AppContext, _environment_id: &str) {}
    fn track(&self, _payload: EventPayload) {}
    fn track_and_present(&self, _payload: EventPayload, _screen: &ScreenHandle) {}
    fn set_user_identifier(&self, _user_id: &str) {}
    fn set_email_address(&self, _email: &str) {}
    fn set_visitor_attribute(&self, _name: &str, _value: AttributeValue) {}
    fn logout(&self) {}
}

/// A single recorded outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCall {
    Configure { environment_id: String },
    Track(EventPayload),
    TrackAndPresent { payload: EventPayload, screen: String },
    SetUserIdentifier(String),
    SetEmailAddress(String),
    SetVisitorAttribute { name: String, value: AttributeValue },
    Logout,
}

/// In-memory client that captures every outbound call, in order, for tests
/// and diagnostics.
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<ClientCall>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clear(&self) {
        self.calls.lock().clear()
    }

    fn record(&self, call: ClientCall) {
        self.calls.lock().push(call);
    }
}

impl EngagementClient for RecordingClient {
    fn configure(&self, _context: &AppContext, environment_id: &str) {
        self.record(ClientCall::Configure {
            environment_id: environment_id.to_string(),
        });
    }

    fn track(&self, payload: EventPayload) {
        self.record(ClientCall::Track(payload));
    }

    fn track_and_present(&self, payload: EventPayload, screen: &ScreenHandle) {
        self.record(ClientCall::TrackAndPresent {
            payload,
            screen: screen.name().to_string(),
        });
    }

    fn set_user_identifier(&self, user_id: &str) {
        self.record(ClientCall::SetUserIdentifier(user_id.to_string()));
    }

    fn set_email_address(&self, email: &str) {
        self.record(ClientCall::SetEmailAddress(email.to_string()));
    }

    fn set_visitor_attribute(&self, name: &str, value: AttributeValue) {
        self.record(ClientCall::SetVisitorAttribute {
            name: name.to_string(),
            value,
        });
    }

    fn logout(&self) {
        self.record(ClientCall::Logout);
    }
}

/// Convenience: create a no-op client handle.
pub fn noop_client() -> Arc<dyn EngagementClient> {
    Arc::new(NoOpClient)
}

/// Convenience: create a recording client for tests.
pub fn recording_client() -> Arc<RecordingClient> {
    Arc::new(RecordingClient::new())
}
