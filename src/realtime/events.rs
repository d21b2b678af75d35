/**
 * Server-to-Client Wire Events
 *
 * This module defines the events pushed over the WebSocket connection.
 * The wire shape is a stable contract with clients: each event is one JSON
 * text frame, externally tagged by name.
 *
 * # Wire Format
 *
 * ```json
 * {"event":"onlineUsers","data":["<uuid>","<uuid>"]}
 * {"event":"newMessage","data":{"id":"...","senderId":"...", ...}}
 * ```
 */

use crate::messages::db::Message;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event pushed to a live connection
///
/// Two events exist:
/// - `OnlineUsers` - the full set of currently online user ids, sent to
///   every connection after each connect/disconnect. The set is always
///   recomputed and sent whole; clients never receive diffs.
/// - `NewMessage` - a newly persisted message, sent only to the receiver's
///   connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Full set of online user ids
    OnlineUsers(Vec<Uuid>),
    /// A newly created message for this connection's user
    NewMessage(Message),
}
