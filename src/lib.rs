//! Watches chat message events, translates the ones that need it with a
//! structured-output language model and replies with an embed.

pub mod config;
pub mod llm;
pub mod pipeline;
pub mod platform;
pub mod routes;
pub mod state;
pub mod translate;
pub mod websocket;
