//! Destination adapter for a product-engagement SDK — translates the host
//! analytics client's track/identify messages into typed engagement calls
//! (event payloads, visitor attributes, user identifiers) and keeps the
//! active-screen bookkeeping used for inline presentation.
//!
//! # Modules
//!
//! - [`adapter`] — The [`EventAdapter`] routing messages onto the client
//! - [`client`] — Engagement-client trait plus recording/no-op implementations
//! - [`factory`] — Registry factory and settings preflight
//! - [`host`] — Host application and screen-lifecycle traits
//! - [`screen`] — Screen handles and active-screen session state

pub mod adapter;
pub mod client;
pub mod factory;
pub mod host;
pub mod screen;

pub use adapter::EventAdapter;
pub use client::{
    noop_client, recording_client, ClientCall, EngagementClient, EventPayload, NoOpClient,
    RecordingClient,
};
pub use factory::{validate_settings, DestinationFactory, EngageFactory, DESTINATION_KEY};
pub use host::{AppContext, HostApplication, InProcessHost, ScreenObserver};
pub use screen::{ActiveScreen, ScreenHandle};
