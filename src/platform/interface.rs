use async_trait::async_trait;

use super::types::{IncomingMessage, MessageRef, ReplyArtifact};

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("discord request failed: {0}")]
    Discord(#[from] serenity::Error),

    #[error("{0}")]
    Other(String),
}

/// Source of decoded inbound message events
#[async_trait]
pub trait EventSource: Send {
    /// Next event, or `None` once the session is over.
    /// Must be cancel safe; the pipeline polls it inside `select!`.
    async fn next_event(&mut self) -> Option<IncomingMessage>;
}

/// Outbound side of the chat platform session
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Post `artifact` as a reply to the referenced message
    async fn reply(&self, target: &MessageRef, artifact: &ReplyArtifact) -> Result<(), PublishError>;
}
