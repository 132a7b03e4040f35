//! Inbound message model — the generic analytics messages the host client
//! hands to destination adapters, and the attribute value union the
//! engagement SDK accepts for visitor attributes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DestinationError, DestinationResult};

/// Maximum attribute name length accepted by the engagement SDK, exclusive.
pub const MAX_ATTRIBUTE_NAME_LEN: usize = 256;

/// Prefix reserved for the engagement SDK's internal attributes.
const RESERVED_ATTRIBUTE_PREFIX: char = '!';

/// Trait key routed to the dedicated email setter instead of generic
/// attribute forwarding.
pub const EMAIL_TRAIT_KEY: &str = "email";

/// A message from the host analytics client's event-processing path.
///
/// This destination forwards `Track` and `Identify`; the remaining kinds
/// exist in the host's model and are dropped here with a warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Track(TrackMessage),
    Identify(IdentifyMessage),
    Screen(ScreenMessage),
    Group(GroupMessage),
    Alias(AliasMessage),
}

impl Message {
    /// Message kind name, for routing diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Track(_) => "track",
            Message::Identify(_) => "identify",
            Message::Screen(_) => "screen",
            Message::Group(_) => "group",
            Message::Alias(_) => "alias",
        }
    }
}

/// An event notification carrying a name and arbitrary properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackMessage {
    pub id: Uuid,
    /// Event name. Required for forwarding; track messages without one are
    /// dropped.
    pub event: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    pub anonymous_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A user-identity notification carrying an id and arbitrary traits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyMessage {
    pub id: Uuid,
    pub user_id: Option<String>,
    #[serde(default)]
    pub traits: HashMap<String, serde_json::Value>,
    pub anonymous_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A screen-view notification. Not forwarded by this destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenMessage {
    pub id: Uuid,
    pub name: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

/// A group-membership notification. Not forwarded by this destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMessage {
    pub id: Uuid,
    pub group_id: Option<String>,
    #[serde(default)]
    pub traits: HashMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

/// An identifier-merge notification. Not forwarded by this destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasMessage {
    pub id: Uuid,
    pub previous_id: Option<String>,
    pub user_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Visitor attribute value union accepted by the engagement SDK.
///
/// Raw JSON values are converted exactly once, at the dispatch boundary, so
/// invalid kinds are rejected in one place and everything downstream works
/// with a closed set of variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl AttributeValue {
    /// Convert a raw property value. Strings and booleans pass through;
    /// numbers are truncated to integer (never rounded), saturating at the
    /// i64 bounds. Every other JSON kind is rejected.
    pub fn from_json(value: &serde_json::Value) -> DestinationResult<Self> {
        match value {
            serde_json::Value::String(s) => Ok(AttributeValue::String(s.clone())),
            serde_json::Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
            serde_json::Value::Number(n) => Ok(AttributeValue::Int(
                n.as_i64()
                    .or_else(|| n.as_f64().map(|f| f as i64))
                    .unwrap_or(0),
            )),
            other => Err(DestinationError::InvalidPropertyValue {
                value: other.to_string(),
            }),
        }
    }
}

/// Check an attribute name against the engagement SDK's naming rules:
/// under 256 characters and no reserved `!` prefix.
pub fn validate_attribute_name(name: &str) -> DestinationResult<()> {
    if name.chars().count() >= MAX_ATTRIBUTE_NAME_LEN
        || name.starts_with(RESERVED_ATTRIBUTE_PREFIX)
    {
        return Err(DestinationError::InvalidPropertyName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_kind_names() {
        let track = Message::Track(TrackMessage {
            id: Uuid::new_v4(),
            event: Some("Purchase".into()),
            properties: HashMap::new(),
            anonymous_id: None,
            timestamp: Utc::now(),
        });
        assert_eq!(track.kind(), "track");

        let alias = Message::Alias(AliasMessage {
            id: Uuid::new_v4(),
            previous_id: Some("anon-1".into()),
            user_id: Some("u-1".into()),
            timestamp: Utc::now(),
        });
        assert_eq!(alias.kind(), "alias");
    }

    #[test]
    fn test_message_serde_tagging() {
        let message = Message::Identify(IdentifyMessage {
            id: Uuid::new_v4(),
            user_id: Some("u-42".into()),
            traits: HashMap::from([("plan".to_string(), serde_json::json!("pro"))]),
            anonymous_id: None,
            timestamp: Utc::now(),
        });

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "identify");
        assert_eq!(json["user_id"], "u-42");

        let parsed: Message = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.kind(), "identify");
    }

    #[test]
    fn test_attribute_value_passthrough() {
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!("pro")).unwrap(),
            AttributeValue::String("pro".into())
        );
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(true)).unwrap(),
            AttributeValue::Bool(true)
        );
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(42)).unwrap(),
            AttributeValue::Int(42)
        );
    }

    #[test]
    fn test_attribute_value_truncates_not_rounds() {
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(9.9)).unwrap(),
            AttributeValue::Int(9)
        );
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(-9.9)).unwrap(),
            AttributeValue::Int(-9)
        );
    }

    #[test]
    fn test_attribute_value_saturates_at_i64_bounds() {
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(1e300)).unwrap(),
            AttributeValue::Int(i64::MAX)
        );
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(-1e300)).unwrap(),
            AttributeValue::Int(i64::MIN)
        );
        assert_eq!(
            AttributeValue::from_json(&serde_json::json!(u64::MAX)).unwrap(),
            AttributeValue::Int(i64::MAX)
        );
    }

    #[test]
    fn test_attribute_value_rejects_other_kinds() {
        assert!(AttributeValue::from_json(&serde_json::Value::Null).is_err());
        assert!(AttributeValue::from_json(&serde_json::json!(["a", "b"])).is_err());
        assert!(AttributeValue::from_json(&serde_json::json!({"k": "v"})).is_err());
    }

    #[test]
    fn test_attribute_name_rules() {
        assert!(validate_attribute_name("plan").is_ok());
        assert!(validate_attribute_name(&"k".repeat(255)).is_ok());
        assert!(validate_attribute_name(&"k".repeat(256)).is_err());
        assert!(validate_attribute_name(&"k".repeat(300)).is_err());
        assert!(validate_attribute_name("!internal").is_err());
    }
}
