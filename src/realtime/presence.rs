/**
 * Presence Broadcaster
 *
 * This module publishes the current online-user-set to every live
 * connection. It owns no state: the registry is read once and the
 * resulting event is fanned out.
 *
 * # Broadcast Semantics
 *
 * The online set is recomputed whole on every change and sent identically
 * to all connections; there is no diffing and no per-client
 * personalization. Each send is an independent non-blocking push, so a
 * slow or stalled peer never delays delivery to the others.
 */

use crate::realtime::events::ServerEvent;
use crate::realtime::registry::ConnectionRegistry;

/// Broadcast the current online set to every live connection
///
/// Called after every successful register and unregister. The set and the
/// recipient handles are taken from the registry in a single lock
/// acquisition, and all pushes happen after the lock is released.
///
/// # Returns
///
/// Number of connections that accepted the event (a full outbound buffer
/// or an already-dead connection counts as a drop, not an error).
pub fn announce(registry: &ConnectionRegistry) -> usize {
    let (online, handles) = registry.presence_view();
    let total = handles.len();
    let event = ServerEvent::OnlineUsers(online);

    let mut delivered = 0;
    for handle in handles {
        if handle.push(event.clone()) {
            delivered += 1;
        }
    }

    if delivered < total {
        tracing::debug!(
            "[Presence] Online set delivered to {}/{} connections",
            delivered,
            total
        );
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_announce_reaches_every_connection() {
        let registry = ConnectionRegistry::new();
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());
        let (h1, mut rx1) = registry.new_handle();
        let (h2, mut rx2) = registry.new_handle();
        registry.register(u1, h1);
        registry.register(u2, h2);

        let delivered = announce(&registry);
        assert_eq!(delivered, 2);

        let mut expected = registry.snapshot();
        expected.sort();

        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await {
                Some(ServerEvent::OnlineUsers(mut online)) => {
                    online.sort();
                    assert_eq!(online, expected);
                }
                other => panic!("expected onlineUsers event, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_announce_payload_matches_post_mutation_snapshot() {
        let registry = ConnectionRegistry::new();
        let u1 = Uuid::new_v4();
        let (h1, mut rx1) = registry.new_handle();
        let conn_id = h1.id();
        registry.register(u1, h1);
        announce(&registry);

        match rx1.recv().await {
            Some(ServerEvent::OnlineUsers(online)) => assert_eq!(online, vec![u1]),
            other => panic!("expected onlineUsers event, got {:?}", other),
        }

        // After the unregister the announce simply has nobody to reach.
        registry.unregister(u1, conn_id);
        assert_eq!(announce(&registry), 0);
    }

    #[tokio::test]
    async fn test_dead_connection_does_not_stall_others() {
        let registry = ConnectionRegistry::new();
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());
        let (h1, rx1) = registry.new_handle();
        let (h2, mut rx2) = registry.new_handle();
        registry.register(u1, h1);
        registry.register(u2, h2);
        drop(rx1);

        let delivered = announce(&registry);
        assert_eq!(delivered, 1);
        assert!(matches!(rx2.recv().await, Some(ServerEvent::OnlineUsers(_))));
    }

    #[test]
    fn test_announce_empty_registry() {
        let registry = ConnectionRegistry::new();
        assert_eq!(announce(&registry), 0);
    }
}
