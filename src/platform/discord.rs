use std::num::NonZeroU64;
use std::sync::Arc;
use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateAllowedMentions, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateMessage, Http, MessageId, Timestamp,
};
use tracing::debug;

use super::interface::{PublishError, Publisher};
use super::types::{MessageRef, ReplyArtifact};

/// Publishes replies through serenity's Discord HTTP client
#[derive(Clone)]
pub struct DiscordPublisher {
    http: Arc<Http>,
}

impl DiscordPublisher {
    /// Share the HTTP client of a running gateway session
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Standalone client for bridge-only deployments
    pub fn from_token(bot_token: &str) -> Self {
        Self::new(Arc::new(Http::new(bot_token)))
    }
}

fn snowflake(raw: &str, kind: &str) -> Result<u64, PublishError> {
    raw.parse::<NonZeroU64>()
        .map(NonZeroU64::get)
        .map_err(|_| PublishError::Other(format!("invalid {} id: {:?}", kind, raw)))
}

/// Embed reply referencing the original message, without pinging its author
pub fn reply_message(
    target: &MessageRef,
    artifact: &ReplyArtifact,
) -> Result<(ChannelId, CreateMessage), PublishError> {
    let channel_id = ChannelId::new(snowflake(&target.channel_id, "channel")?);
    let message_id = MessageId::new(snowflake(&target.message_id, "message")?);
    let timestamp = Timestamp::from_unix_timestamp(artifact.timestamp.timestamp())
        .map_err(|e| PublishError::Other(e.to_string()))?;

    let mut author = CreateEmbedAuthor::new(&artifact.author_name);
    if !artifact.author_icon_url.is_empty() {
        author = author.icon_url(&artifact.author_icon_url);
    }

    let embed = CreateEmbed::new()
        .colour(artifact.color)
        .author(author)
        .description(&artifact.body_text)
        .footer(CreateEmbedFooter::new(&artifact.footer_text))
        .timestamp(timestamp);

    let message = CreateMessage::new()
        .embed(embed)
        .reference_message((channel_id, message_id))
        .allowed_mentions(CreateAllowedMentions::new().replied_user(false));

    Ok((channel_id, message))
}

#[async_trait]
impl Publisher for DiscordPublisher {
    async fn reply(&self, target: &MessageRef, artifact: &ReplyArtifact) -> Result<(), PublishError> {
        let (channel_id, message) = reply_message(target, artifact)?;
        channel_id.send_message(&self.http, message).await?;

        debug!("Replied to message {} in channel {}", target.message_id, target.channel_id);
        Ok(())
    }
}
