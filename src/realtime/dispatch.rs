/**
 * Message Dispatcher
 *
 * This module pushes a newly persisted message to its receiver's live
 * connection, if one exists. Dispatch is invoked by the REST send-message
 * handler immediately after the insert succeeds and is strictly
 * best-effort: it must never fail the caller, the message stays durably
 * queryable through the history endpoint either way.
 */

use crate::messages::db::Message;
use crate::realtime::events::ServerEvent;
use crate::realtime::registry::ConnectionRegistry;

/// Push a persisted message to the receiver's connection, if online
///
/// Performs a point-in-time registry lookup; no registry lock is held
/// while pushing. An offline receiver, a full outbound buffer, and an
/// already-dead connection are all silent no-ops.
pub fn dispatch(registry: &ConnectionRegistry, message: &Message) {
    let Some(handle) = registry.lookup(message.receiver_id) else {
        tracing::debug!(
            "[Dispatch] Receiver {} offline, message {} stored only",
            message.receiver_id,
            message.id
        );
        return;
    };

    if handle.push(ServerEvent::NewMessage(message.clone())) {
        tracing::debug!(
            "[Dispatch] Message {} pushed to receiver {}",
            message.id,
            message.receiver_id
        );
    } else {
        tracing::debug!(
            "[Dispatch] Push to receiver {} dropped (connection stalled or gone)",
            message.receiver_id
        );
    }
}
