//! End-to-end scenario tests for the presence and delivery core
//!
//! Drives the registry, presence broadcaster and dispatcher through the
//! connect / message / disconnect sequence the realtime gateway performs,
//! asserting on the events each connection's queue receives.

use chrono::Utc;
use pretty_assertions::assert_eq;
use pulsechat::messages::db::Message;
use pulsechat::realtime::{announce, dispatch, ConnectionRegistry, ServerEvent};
use tokio::sync::mpsc::Receiver;
use uuid::Uuid;

fn message(sender_id: Uuid, receiver_id: Uuid, text: &str) -> Message {
    Message {
        id: Uuid::new_v4(),
        sender_id,
        receiver_id,
        text: Some(text.to_string()),
        image_url: None,
        created_at: Utc::now(),
    }
}

fn expect_online_users(rx: &mut Receiver<ServerEvent>) -> Vec<Uuid> {
    match rx.try_recv() {
        Ok(ServerEvent::OnlineUsers(mut online)) => {
            online.sort();
            online
        }
        other => panic!("expected onlineUsers event, got {:?}", other),
    }
}

fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}

#[tokio::test]
async fn connect_message_disconnect_scenario() {
    let registry = ConnectionRegistry::new();
    let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());

    // u1 connects.
    let (h1, mut rx1) = registry.new_handle();
    registry.register(u1, h1);
    announce(&registry);

    assert_eq!(registry.snapshot(), vec![u1]);
    assert_eq!(expect_online_users(&mut rx1), vec![u1]);

    // u2 connects; everyone sees the grown set.
    let (h2, mut rx2) = registry.new_handle();
    let conn2 = h2.id();
    registry.register(u2, h2);
    announce(&registry);

    assert_eq!(sorted(registry.snapshot()), sorted(vec![u1, u2]));
    assert_eq!(expect_online_users(&mut rx1), sorted(vec![u1, u2]));
    assert_eq!(expect_online_users(&mut rx2), sorted(vec![u1, u2]));

    // u2 sends "hi" to u1: exactly one push, to u1 only.
    let msg = message(u2, u1, "hi");
    dispatch(&registry, &msg);

    match rx1.try_recv() {
        Ok(ServerEvent::NewMessage(delivered)) => {
            assert_eq!(delivered, msg);
            assert_eq!(delivered.text.as_deref(), Some("hi"));
        }
        other => panic!("expected newMessage event, got {:?}", other),
    }
    assert!(rx2.try_recv().is_err(), "sender must receive nothing");

    // u2 disconnects; u1 sees the shrunken set.
    registry.unregister(u2, conn2);
    announce(&registry);

    assert_eq!(registry.snapshot(), vec![u1]);
    assert_eq!(expect_online_users(&mut rx1), vec![u1]);
}

#[tokio::test]
async fn superseded_connection_loses_delivery_to_successor() {
    let registry = ConnectionRegistry::new();
    let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());

    let (h_sender, _rx_sender) = registry.new_handle();
    registry.register(u2, h_sender);

    // u1 reconnects: the second connection supersedes the first.
    let (h_old, mut rx_old) = registry.new_handle();
    let old_id = h_old.id();
    registry.register(u1, h_old);
    let (h_new, mut rx_new) = registry.new_handle();
    registry.register(u1, h_new);

    dispatch(&registry, &message(u2, u1, "after reconnect"));

    assert!(
        rx_old.try_recv().is_err(),
        "superseded connection must not receive the message"
    );
    assert!(matches!(
        rx_new.try_recv(),
        Ok(ServerEvent::NewMessage(_))
    ));

    // The old connection's late disconnect must not take u1 offline.
    registry.unregister(u1, old_id);
    assert!(registry.lookup(u1).is_some());

    dispatch(&registry, &message(u2, u1, "still online"));
    assert!(matches!(
        rx_new.try_recv(),
        Ok(ServerEvent::NewMessage(_))
    ));
}

#[tokio::test]
async fn announce_follows_every_mutation() {
    let registry = ConnectionRegistry::new();
    let u1 = Uuid::new_v4();

    let (h1, mut rx1) = registry.new_handle();
    let conn1 = h1.id();
    registry.register(u1, h1);
    announce(&registry);

    // Exactly one announce per mutation: one event queued so far.
    assert!(matches!(rx1.try_recv(), Ok(ServerEvent::OnlineUsers(_))));
    assert!(rx1.try_recv().is_err());

    registry.unregister(u1, conn1);
    announce(&registry);

    // The connection is gone; nothing more arrives on its queue.
    assert!(rx1.try_recv().is_err());
    assert!(registry.snapshot().is_empty());
}
