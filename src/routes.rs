use axum::{
    extract::{State, WebSocketUpgrade},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, warn};

use crate::platform::IncomingMessage;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Gateway bridge
        .route("/bridge-ws", get(websocket_handler))
        .route("/api/events", post(receive_event))
        // Health check
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    crate::websocket::websocket_handler(ws, State(state)).await
}

async fn receive_event(
    State(state): State<AppState>,
    Json(message): Json<IncomingMessage>,
) -> (StatusCode, Json<Value>) {
    let id = message.id.clone();
    match state.events.send(message).await {
        Ok(()) => {
            debug!("Queued message {}", id);
            (StatusCode::ACCEPTED, Json(json!({ "status": "queued", "id": id })))
        }
        Err(_) => {
            warn!("Pipeline stopped, rejecting message {}", id);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "message": "pipeline is not running" })),
            )
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "connected_bridges": state.bridges.len(),
        "provider": state.provider,
        "target_language": state.target_language,
    }))
}
