use serde::{Deserialize, Serialize};

use crate::models::Message;

/// JSON envelope carried in realtime text frames.
///
/// Every field is optional on the wire; peers have historically sent
/// partial envelopes (no `id` before the server assigns one, a channel
/// name instead of an id, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Channel display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Author display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub contains_pii: bool,
    #[serde(default)]
    pub restricted_to_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl RealtimeEnvelope {
    /// Envelope announcing a message that was just created through the API.
    pub fn for_message(message: &Message) -> Self {
        Self {
            id: Some(message.id.0.clone()),
            channel: Some(message.channel.name.clone()),
            channel_id: Some(message.channel.id.0.clone()),
            author: Some(message.author.username.clone()),
            content: message.content.clone(),
            is_anonymous: message.is_anonymous,
            contains_pii: message.contains_pii,
            restricted_to_names: message.restricted_to_names.clone(),
            created_at: message.created_at.as_ref().map(|t| t.0.clone()),
            updated_at: message.updated_at.as_ref().map(|t| t.0.clone()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_envelope_decodes() {
        let env = RealtimeEnvelope::from_json(
            r#"{"content":"hi","author":"ada","channel":"Mission","createdAt":"2025-08-13T10:00:00Z","isAnonymous":true}"#,
        )
        .unwrap();
        assert_eq!(env.content, "hi");
        assert_eq!(env.author.as_deref(), Some("ada"));
        assert!(env.is_anonymous);
        assert!(!env.contains_pii);
        assert!(env.id.is_none());
        assert!(env.restricted_to_names.is_empty());
    }

    #[test]
    fn test_envelope_uses_camel_case() {
        let env = RealtimeEnvelope {
            channel_id: Some("c-1".into()),
            restricted_to_names: vec!["Bo".into()],
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::from_str(&env.to_json().unwrap()).unwrap();
        assert_eq!(json["channelId"], "c-1");
        assert_eq!(json["restrictedToNames"][0], "Bo");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(RealtimeEnvelope::from_json("hello").is_err());
        assert!(RealtimeEnvelope::from_json("[1,2]").is_err());
    }
}
