use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use tracing::{debug, info};

use crate::sockets::SocketRegistry;
use crate::state::AppState;

pub async fn connect(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state.sockets, socket))
}

/// Hold the connection open until the client leaves. Inbound frames are
/// not interpreted yet.
async fn handle_socket(registry: Arc<SocketRegistry>, mut socket: WebSocket) {
    let id = registry.register().await;
    info!(socket_id = id, "WebSocket client connected");

    while let Some(frame) = socket.recv().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(_) => debug!(socket_id = id, "Ignoring WebSocket frame"),
            Err(e) => {
                debug!(socket_id = id, error = %e, "WebSocket receive failed");
                break;
            }
        }
    }

    if let Some(connected_at) = registry.unregister(id).await {
        let secs = (chrono::Utc::now() - connected_at).num_seconds();
        info!(socket_id = id, connected_secs = secs, "WebSocket client disconnected");
    }
}
