//! Discord gateway session feeding the pipeline's event channel.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serenity::{
    all::{Client, Context, EventHandler, GatewayIntents, Http, Message, Ready, ShardManager},
    async_trait,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::types::IncomingMessage;

/// Forwards every `messageCreate` to the pipeline. Filtering happens there,
/// so bot messages are forwarded too.
pub struct GatewayHandler {
    events: mpsc::Sender<IncomingMessage>,
}

impl GatewayHandler {
    pub fn new(events: mpsc::Sender<IncomingMessage>) -> Self {
        Self { events }
    }

    /// Guild data, guild messages and their content
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
    }
}

pub fn incoming_message(msg: &Message) -> IncomingMessage {
    IncomingMessage {
        id: msg.id.to_string(),
        channel_id: msg.channel_id.to_string(),
        author_id: msg.author.id.to_string(),
        author_display_name: msg.author.name.clone(),
        author_avatar_url: msg.author.face(),
        is_from_automated_account: msg.author.bot,
        raw_content: msg.content.clone(),
        created_at: DateTime::from_timestamp(msg.timestamp.unix_timestamp(), 0).unwrap_or_else(Utc::now),
    }
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(guilds = ready.guilds.len(), "Logged in as {}", ready.user.tag());
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        if self.events.send(incoming_message(&msg)).await.is_err() {
            warn!("Pipeline stopped, dropping message {}", msg.id);
        }
    }
}

/// A running gateway session
pub struct DiscordGateway {
    pub http: Arc<Http>,
    shard_manager: Arc<ShardManager>,
    task: JoinHandle<()>,
}

impl DiscordGateway {
    /// Log in and run the session in the background
    pub async fn connect(bot_token: &str, events: mpsc::Sender<IncomingMessage>) -> Result<Self, serenity::Error> {
        let mut client = Client::builder(bot_token, GatewayHandler::intents())
            .event_handler(GatewayHandler::new(events))
            .await?;

        let http = client.http.clone();
        let shard_manager = client.shard_manager.clone();
        let task = tokio::spawn(async move {
            if let Err(e) = client.start().await {
                error!("Discord gateway stopped: {}", e);
            }
        });

        Ok(Self {
            http,
            shard_manager,
            task,
        })
    }

    /// Close the shards; dropping the client releases its event sender
    pub async fn shutdown(self) {
        self.shard_manager.shutdown_all().await;
        if let Err(e) = self.task.await {
            warn!("Gateway task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway_payload(bot: bool) -> Message {
        serde_json::from_value(json!({
            "id": "1001",
            "channel_id": "2002",
            "guild_id": "4004",
            "author": {
                "id": "3003",
                "username": "camille",
                "discriminator": "0",
                "global_name": "Camille",
                "avatar": null,
                "bot": bot
            },
            "content": "Bonjour tout le monde",
            "timestamp": "2024-05-01T12:00:00.000000+00:00",
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "embeds": [],
            "pinned": false,
            "type": 0,
            "flags": 0,
            "components": []
        }))
        .unwrap()
    }

    #[test]
    fn intents_include_message_content() {
        let intents = GatewayHandler::intents();
        assert!(intents.contains(GatewayIntents::GUILD_MESSAGES));
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
    }

    #[test]
    fn maps_gateway_message() {
        let incoming = incoming_message(&gateway_payload(false));

        assert_eq!(incoming.id, "1001");
        assert_eq!(incoming.channel_id, "2002");
        assert_eq!(incoming.author_id, "3003");
        assert_eq!(incoming.author_display_name, "camille");
        assert!(incoming.author_avatar_url.starts_with("https://cdn.discordapp.com/"));
        assert!(!incoming.is_from_automated_account);
        assert_eq!(incoming.raw_content, "Bonjour tout le monde");
        assert_eq!(incoming.created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn bot_flag_is_carried() {
        assert!(incoming_message(&gateway_payload(true)).is_from_automated_account);
    }
}
