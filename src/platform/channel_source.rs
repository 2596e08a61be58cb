use async_trait::async_trait;
use tokio::sync::mpsc;

use super::interface::EventSource;
use super::types::IncomingMessage;

/// Event source fed by the HTTP / WebSocket ingress
pub struct ChannelEventSource {
    receiver: mpsc::Receiver<IncomingMessage>,
}

impl ChannelEventSource {
    /// Create a source and the sender half handed to the ingress
    pub fn new(buffer: usize) -> (mpsc::Sender<IncomingMessage>, Self) {
        let (sender, receiver) = mpsc::channel(buffer);
        (sender, Self { receiver })
    }
}

#[async_trait]
impl EventSource for ChannelEventSource {
    async fn next_event(&mut self) -> Option<IncomingMessage> {
        self.receiver.recv().await
    }
}
