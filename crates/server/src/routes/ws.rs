use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use service::auth::repository::AccountStore;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::gateway::Gateway;
use crate::observability;
use crate::protocol::{ProtocolError, FALLBACK_ERROR_FRAME};
use crate::routes::ServerState;

/// `GET /ws`: upgrade and serve one client.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<ServerState>) -> Response {
    ws.on_upgrade(move |socket| serve_connection(socket, state.gateway))
}

/// Read frames in order and write one reply per request before reading the
/// next, so replies never interleave on a connection.
pub async fn serve_connection<R: AccountStore + 'static>(mut socket: WebSocket, gateway: Arc<Gateway<R>>) {
    let conn = Uuid::new_v4();
    observability::connection_opened();
    info!(%conn, "client connected");

    while let Some(msg) = socket.recv().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                warn!(%conn, error = %e, "socket receive failed");
                break;
            }
        };
        let reply = match msg {
            Message::Text(text) => gateway.handle_text(conn, &text).await,
            Message::Binary(_) => gateway.reject_frame(conn, ProtocolError::BinaryFrame),
            Message::Ping(_) | Message::Pong(_) => continue,
            Message::Close(_) => break,
        };
        let frame = reply.encode().unwrap_or_else(|e| {
            error!(%conn, error = %e, "failed to encode reply");
            FALLBACK_ERROR_FRAME.to_string()
        });
        if let Err(e) = socket.send(Message::Text(frame)).await {
            warn!(%conn, error = %e, "socket send failed");
            break;
        }
    }

    observability::connection_closed();
    info!(%conn, "client disconnected");
}
