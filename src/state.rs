use std::sync::Arc;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::platform::IncomingMessage;

#[derive(Clone)]
pub struct AppState {
    pub events: mpsc::Sender<IncomingMessage>,
    pub bridges: Arc<DashMap<String, BridgeInfo>>,
    pub provider: String,
    pub target_language: String,
}

/// A connected gateway bridge
#[derive(Debug, Clone)]
pub struct BridgeInfo {
    pub bridge_id: String,
    pub connected_at: DateTime<Utc>,
    pub events_received: u64,
}

impl AppState {
    pub fn new(events: mpsc::Sender<IncomingMessage>, provider: String, target_language: String) -> Self {
        Self {
            events,
            bridges: Arc::new(DashMap::new()),
            provider,
            target_language,
        }
    }

    pub fn generate_bridge_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
