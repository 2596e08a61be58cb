pub mod types;
pub mod interface;
pub mod channel_source;
pub mod discord;
pub mod gateway;

pub use types::*;
pub use interface::*;
pub use channel_source::ChannelEventSource;
pub use discord::DiscordPublisher;
pub use gateway::DiscordGateway;
