/**
 * Realtime Gateway
 *
 * This module owns the WebSocket connection lifecycle and is the only
 * realtime component that touches the transport. A connection moves
 * through `Connecting -> Authenticated -> Active -> Closed`:
 *
 * - `Connecting`: the HTTP upgrade request arrives carrying the user id
 *   as a `userId` query parameter.
 * - `Authenticated`: the id parses as a UUID; the gateway registers the
 *   connection and broadcasts the updated online set.
 * - `Active`: outbound events are pumped to the socket; inbound frames
 *   are drained and ignored (client traffic goes over REST).
 * - `Closed`: on close frame, transport error or server shutdown the
 *   gateway unregisters (identity-checked) and broadcasts again. Terminal.
 *
 * A missing or invalid `userId` declines the upgrade with 400 before any
 * registration happens, so no orphan registry entries can exist.
 *
 * # Identity
 *
 * The handshake trusts the client-supplied id; it is not cross-checked
 * against the session cookie. See DESIGN.md.
 */

use crate::realtime::presence;
use crate::realtime::registry::ConnectionRegistry;
use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Connection-establishment metadata supplied by the client
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// The connecting user's id, as a UUID string
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl ConnectParams {
    /// Resolve the supplied user id, if present and well-formed
    pub fn resolve_user_id(&self) -> Option<Uuid> {
        self.user_id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw).ok())
    }
}

/// Handle a realtime connection request (GET /ws)
///
/// Validates the `userId` query parameter and upgrades the connection.
///
/// # Errors
///
/// * `400 Bad Request` - If `userId` is missing or not a valid UUID
pub async fn ws_handler(
    State(registry): State<Arc<ConnectionRegistry>>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> Response {
    let Some(user_id) = params.resolve_user_id() else {
        tracing::warn!("[Gateway] Connection declined: missing or invalid userId");
        return StatusCode::BAD_REQUEST.into_response();
    };

    ws.on_upgrade(move |socket| handle_socket(registry, user_id, socket))
}

/// Run one connection from registration to disconnect
///
/// Each connection gets its own task; nothing here blocks on another
/// connection's I/O. Outbound events arrive through the handle's bounded
/// queue and are forwarded to the socket as JSON text frames.
async fn handle_socket(registry: Arc<ConnectionRegistry>, user_id: Uuid, socket: WebSocket) {
    let (handle, mut events) = registry.new_handle();
    let conn_id = handle.id();

    registry.register(user_id, handle);
    presence::announce(&registry);
    tracing::info!("[Gateway] User {} connected (conn {})", user_id, conn_id);

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                // `None` means the handle side is gone; treat as shutdown.
                let Some(event) = event else { break };
                let payload = match serde_json::to_string(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!("[Gateway] Failed to serialize event: {:?}", e);
                        continue;
                    }
                };
                if sink.send(WsMessage::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            frame = stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                    // Inbound frames carry no protocol; drain and ignore.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    registry.unregister(user_id, conn_id);
    presence::announce(&registry);
    tracing::info!("[Gateway] User {} disconnected (conn {})", user_id, conn_id);
}
