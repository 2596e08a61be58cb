use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::Response,
};
use axum::extract::ws::WebSocket;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tracing::{error, info, warn};

use crate::platform::IncomingMessage;
use crate::state::{AppState, BridgeInfo};

pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Each text frame carries one `IncomingMessage` as JSON
async fn handle_socket(socket: WebSocket, state: AppState) {
    let bridge_id = state.generate_bridge_id();
    info!("Gateway bridge connected: {}", bridge_id);

    state.bridges.insert(
        bridge_id.clone(),
        BridgeInfo {
            bridge_id: bridge_id.clone(),
            connected_at: Utc::now(),
            events_received: 0,
        },
    );

    let (mut sender, mut receiver) = socket.split();

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let reply = match serde_json::from_str::<IncomingMessage>(&text) {
                    Ok(message) => {
                        let id = message.id.clone();
                        if state.events.send(message).await.is_err() {
                            error!("Pipeline stopped, closing bridge {}", bridge_id);
                            break;
                        }
                        if let Some(mut info) = state.bridges.get_mut(&bridge_id) {
                            info.events_received += 1;
                        }
                        json!({ "type": "ack", "id": id })
                    }
                    Err(e) => {
                        warn!("Malformed event from bridge {}: {}", bridge_id, e);
                        json!({ "type": "error", "message": e.to_string() })
                    }
                };

                if let Err(e) = sender.send(Message::Text(reply.to_string())).await {
                    error!("Failed to answer bridge {}: {}", bridge_id, e);
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("Bridge {} disconnected", bridge_id);
                break;
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    if let Some((_, info)) = state.bridges.remove(&bridge_id) {
        info!(
            "Cleaned up bridge {} ({} events since {})",
            info.bridge_id, info.events_received, info.connected_at
        );
    }
}
