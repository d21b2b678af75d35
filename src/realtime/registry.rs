/**
 * Connection Registry
 *
 * This module holds the live mapping from user id to connection handle.
 * It is pure in-memory state shared between the WebSocket gateway (which
 * registers and unregisters connections) and the REST message-creation
 * path (which looks up receivers for push delivery).
 *
 * # Invariants
 *
 * - At most one handle is registered per user id at any time. A later
 *   connection for the same user supersedes the earlier mapping
 *   (last-registered wins).
 * - A user appears in `snapshot()` iff it currently has a registered handle.
 * - Entries are removed exactly once, by the disconnect of the handle that
 *   created them: `unregister` compares connection ids before deleting, so
 *   a stale disconnect of an already-superseded handle never evicts the
 *   newer mapping.
 *
 * # Concurrency
 *
 * All operations take the internal mutex for a single short critical
 * section over the in-memory map. The identity-checked unregister
 * (lookup + compare + delete) happens entirely inside one lock
 * acquisition. No lock is ever held while pushing to a connection;
 * `lookup` hands out a cheap clone of the handle instead.
 */

use crate::realtime::events::ServerEvent;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique identifier of a single connection, allocated by the registry
pub type ConnId = u64;

/// Per-connection outbound buffer capacity
///
/// Bounds memory growth from a stalled peer: once the buffer is full,
/// further pushes are dropped rather than queued.
const OUTBOUND_BUFFER: usize = 64;

/// Handle to one live connection's outbound event queue
///
/// The gateway owns the connection itself; the registry holds only this
/// non-owning handle. Cloning is cheap (id + channel sender), which lets
/// callers push events after the registry lock has been released.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnId,
    tx: mpsc::Sender<ServerEvent>,
}

impl ConnectionHandle {
    /// Connection id of this handle
    pub fn id(&self) -> ConnId {
        self.id
    }

    /// Push an event to this connection without blocking
    ///
    /// Fire-and-forget: returns `false` when the connection's outbound
    /// buffer is full or the connection is already gone, and the event is
    /// dropped. Failures never propagate to the caller; the gateway task
    /// is responsible for noticing a dead transport and unregistering.
    pub fn push(&self, event: ServerEvent) -> bool {
        self.tx.try_send(event).is_ok()
    }
}

/// Live mapping from user id to connection handle
///
/// One instance is created at process start, stored in `AppState` and
/// passed by reference to both the gateway and the REST handlers. There
/// is deliberately no static/global instance.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    conns: Mutex<HashMap<Uuid, ConnectionHandle>>,
    next_conn_id: AtomicU64,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle for a new connection
    ///
    /// Returns the handle together with the receiving end of its outbound
    /// queue. The gateway forwards events from the receiver to the socket;
    /// dropping the receiver makes every subsequent `push` fail, which is
    /// how a superseded or dead connection degrades.
    pub fn new_handle(&self) -> (ConnectionHandle, mpsc::Receiver<ServerEvent>) {
        let id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);
        (ConnectionHandle { id, tx }, rx)
    }

    /// Insert or overwrite the mapping for a user
    ///
    /// If an earlier mapping exists it is replaced; the superseded handle
    /// is not closed here (closing is the gateway's concern), it simply
    /// becomes unreachable via `lookup`.
    pub fn register(&self, user_id: Uuid, handle: ConnectionHandle) {
        let mut conns = self.conns.lock().unwrap();
        if let Some(old) = conns.insert(user_id, handle) {
            tracing::debug!(
                "[Registry] Superseded connection {} for user {}",
                old.id,
                user_id
            );
        }
    }

    /// Remove the mapping for a user, but only if it still belongs to the
    /// given connection
    ///
    /// This is the tie-break that makes supersession safe: when connection
    /// A disconnects after having been replaced by connection B, A's
    /// unregister compares ids, sees B's, and leaves the mapping alone.
    pub fn unregister(&self, user_id: Uuid, conn_id: ConnId) {
        let mut conns = self.conns.lock().unwrap();
        match conns.get(&user_id) {
            Some(current) if current.id == conn_id => {
                conns.remove(&user_id);
            }
            Some(_) => {
                tracing::debug!(
                    "[Registry] Stale unregister for user {} (conn {}), mapping kept",
                    user_id,
                    conn_id
                );
            }
            None => {}
        }
    }

    /// Current handle for a user, if online
    pub fn lookup(&self, user_id: Uuid) -> Option<ConnectionHandle> {
        self.conns.lock().unwrap().get(&user_id).cloned()
    }

    /// Set of user ids currently online
    pub fn snapshot(&self) -> Vec<Uuid> {
        self.conns.lock().unwrap().keys().copied().collect()
    }

    /// Online set and live handles, taken in a single lock acquisition
    ///
    /// Used by the presence broadcaster so that the announced set and the
    /// recipients come from the same instant.
    pub fn presence_view(&self) -> (Vec<Uuid>, Vec<ConnectionHandle>) {
        let conns = self.conns.lock().unwrap();
        let online = conns.keys().copied().collect();
        let handles = conns.values().cloned().collect();
        (online, handles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ConnectionRegistry::new();
        let u1 = user();
        let (handle, _rx) = registry.new_handle();
        let conn_id = handle.id();

        registry.register(u1, handle);

        let found = registry.lookup(u1).expect("user should be online");
        assert_eq!(found.id(), conn_id);
        assert!(registry.lookup(user()).is_none());
    }

    #[test]
    fn test_snapshot_tracks_registered_users() {
        let registry = ConnectionRegistry::new();
        let (u1, u2) = (user(), user());
        let (h1, _rx1) = registry.new_handle();
        let (h2, _rx2) = registry.new_handle();

        registry.register(u1, h1);
        registry.register(u2, h2.clone());

        let mut online = registry.snapshot();
        online.sort();
        let mut expected = vec![u1, u2];
        expected.sort();
        assert_eq!(online, expected);

        registry.unregister(u2, h2.id());
        assert_eq!(registry.snapshot(), vec![u1]);
    }

    #[test]
    fn test_supersession_tie_break() {
        let registry = ConnectionRegistry::new();
        let u1 = user();
        let (h1, _rx1) = registry.new_handle();
        let (h2, _rx2) = registry.new_handle();
        let (id1, id2) = (h1.id(), h2.id());

        registry.register(u1, h1);
        registry.register(u1, h2);

        // Stale disconnect of the superseded connection must not evict
        // the newer mapping.
        registry.unregister(u1, id1);
        assert_eq!(registry.lookup(u1).unwrap().id(), id2);

        // Only the current connection's disconnect removes the entry.
        registry.unregister(u1, id2);
        assert!(registry.lookup(u1).is_none());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_unregister_unknown_user_is_noop() {
        let registry = ConnectionRegistry::new();
        registry.unregister(user(), 42);
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_handle_ids_are_unique() {
        let registry = ConnectionRegistry::new();
        let (h1, _rx1) = registry.new_handle();
        let (h2, _rx2) = registry.new_handle();
        assert_ne!(h1.id(), h2.id());
    }

    #[tokio::test]
    async fn test_push_after_receiver_dropped_fails_quietly() {
        let registry = ConnectionRegistry::new();
        let (handle, rx) = registry.new_handle();
        drop(rx);
        assert!(!handle.push(ServerEvent::OnlineUsers(vec![])));
    }

    #[tokio::test]
    async fn test_push_is_bounded_not_blocking() {
        let registry = ConnectionRegistry::new();
        let (handle, _rx) = registry.new_handle();

        // Fill the buffer; pushes past capacity are dropped, never block.
        let mut accepted = 0;
        for _ in 0..(OUTBOUND_BUFFER + 10) {
            if handle.push(ServerEvent::OnlineUsers(vec![])) {
                accepted += 1;
            }
        }
        assert_eq!(accepted, OUTBOUND_BUFFER);
    }
}
