//! Core types for the EngageBridge destination adapter — the inbound
//! message model handed over by the host analytics client, the attribute
//! value union accepted by the engagement SDK, destination configuration,
//! and the shared error taxonomy.

pub mod config;
pub mod error;
pub mod message;

pub use config::DestinationConfig;
pub use error::{DestinationError, DestinationResult};
pub use message::{AttributeValue, IdentifyMessage, Message, TrackMessage};
