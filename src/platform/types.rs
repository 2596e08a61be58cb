use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default embed accent color
pub const DEFAULT_ACCENT_COLOR: u32 = 0x0099ff;

/// A decoded "message received" event from the chat platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingMessage {
    pub id: String,
    pub channel_id: String,
    pub author_id: String,
    pub author_display_name: String,
    #[serde(default)]
    pub author_avatar_url: String,
    #[serde(default)]
    pub is_from_automated_account: bool,
    pub raw_content: String,
    pub created_at: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn message_ref(&self) -> MessageRef {
        MessageRef {
            channel_id: self.channel_id.clone(),
            message_id: self.id.clone(),
        }
    }
}

/// Identity of the message a reply is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub channel_id: String,
    pub message_id: String,
}

/// Embed-like reply built fresh for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyArtifact {
    pub color: u32,
    pub author_name: String,
    pub author_icon_url: String,
    pub body_text: String,
    pub footer_text: String,
    pub timestamp: DateTime<Utc>,
}

impl ReplyArtifact {
    /// Render as a Discord embed object
    pub fn to_embed(&self) -> Value {
        let mut author = json!({ "name": self.author_name });
        if !self.author_icon_url.is_empty() {
            author["icon_url"] = json!(self.author_icon_url);
        }

        json!({
            "color": self.color,
            "author": author,
            "description": self.body_text,
            "footer": { "text": self.footer_text },
            "timestamp": self.timestamp.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_message_reads_camel_case() {
        let raw = json!({
            "id": "m1",
            "channelId": "c1",
            "authorId": "u1",
            "authorDisplayName": "Zoé",
            "authorAvatarUrl": "https://cdn.example/a.png",
            "isFromAutomatedAccount": false,
            "rawContent": "Bonjour",
            "createdAt": "2024-05-01T12:00:00Z"
        });

        let message: IncomingMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(message.author_display_name, "Zoé");
        assert_eq!(
            message.message_ref(),
            MessageRef {
                channel_id: "c1".into(),
                message_id: "m1".into()
            }
        );
    }

    #[test]
    fn bot_flag_and_avatar_default_when_missing() {
        let raw = json!({
            "id": "m1",
            "channelId": "c1",
            "authorId": "u1",
            "authorDisplayName": "sam",
            "rawContent": "hola",
            "createdAt": "2024-05-01T12:00:00Z"
        });

        let message: IncomingMessage = serde_json::from_value(raw).unwrap();
        assert!(!message.is_from_automated_account);
        assert!(message.author_avatar_url.is_empty());
    }

    #[test]
    fn embed_omits_empty_icon() {
        let artifact = ReplyArtifact {
            color: DEFAULT_ACCENT_COLOR,
            author_name: "sam".into(),
            author_icon_url: String::new(),
            body_text: "Hello".into(),
            footer_text: "Original language: Spanish".into(),
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
        };

        let embed = artifact.to_embed();
        assert_eq!(embed["color"], json!(0x0099ff));
        assert_eq!(embed["description"], "Hello");
        assert_eq!(embed["footer"]["text"], "Original language: Spanish");
        assert!(embed["author"].get("icon_url").is_none());
    }
}
