//! Gateway lifecycle tests over a real WebSocket connection
//!
//! Serves the full router on an ephemeral port and drives it with a
//! tungstenite client: connect registers and broadcasts, close unregisters
//! and broadcasts, a reconnect supersedes the old connection without ever
//! taking the user offline.

use futures_util::StreamExt;
use pulsechat::media::MediaStore;
use pulsechat::realtime::ConnectionRegistry;
use pulsechat::routes::create_router;
use pulsechat::server::AppState;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite, MaybeTlsStream, WebSocketStream};
use uuid::Uuid;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> (SocketAddr, Arc<ConnectionRegistry>, tempfile::TempDir) {
    let registry = Arc::new(ConnectionRegistry::new());
    let dir = tempfile::tempdir().unwrap();
    let state = AppState {
        registry: registry.clone(),
        db_pool: None,
        media: MediaStore::new(dir.path()).unwrap(),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, registry, dir)
}

async fn connect(addr: SocketAddr, user_id: Uuid) -> WsClient {
    let url = format!("ws://{}/ws?userId={}", addr, user_id);
    let (ws, _) = connect_async(url).await.expect("websocket connect");
    ws
}

/// Read frames until the next `onlineUsers` event, returning its sorted ids
async fn next_online_users(ws: &mut WsClient) -> Vec<Uuid> {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("frame within timeout")
            .expect("stream still open")
            .expect("frame readable");
        if let tungstenite::Message::Text(text) = frame {
            let value: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value["event"], "onlineUsers");
            let mut ids: Vec<Uuid> = serde_json::from_value(value["data"].clone()).unwrap();
            ids.sort();
            return ids;
        }
    }
}

/// Drain a client until the server ends the connection
async fn read_until_closed(mut ws: WsClient) {
    loop {
        match tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("close within timeout")
        {
            None | Some(Err(_)) => return,
            Some(Ok(tungstenite::Message::Close(_))) => return,
            Some(Ok(_)) => {}
        }
    }
}

/// Poll until the registry holds exactly `expected` entries
async fn wait_for_online_count(registry: &ConnectionRegistry, expected: usize) {
    for _ in 0..200 {
        if registry.snapshot().len() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "registry never reached {} entries: {:?}",
        expected,
        registry.snapshot()
    );
}

fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}

#[tokio::test]
async fn connect_and_close_drive_registration_and_broadcast() {
    let (addr, registry, _dir) = spawn_server().await;
    let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());

    // u1 connects: registered, and the first frame is the online set.
    let mut ws1 = connect(addr, u1).await;
    assert_eq!(next_online_users(&mut ws1).await, vec![u1]);
    assert!(registry.lookup(u1).is_some());

    // u2 connects: both clients see the grown set.
    let mut ws2 = connect(addr, u2).await;
    assert_eq!(next_online_users(&mut ws2).await, sorted(vec![u1, u2]));
    assert_eq!(next_online_users(&mut ws1).await, sorted(vec![u1, u2]));

    // u2 closes: the gateway unregisters and announces the shrunken set.
    ws2.close(None).await.unwrap();
    read_until_closed(ws2).await;
    wait_for_online_count(&registry, 1).await;
    assert!(registry.lookup(u2).is_none());
    assert_eq!(next_online_users(&mut ws1).await, vec![u1]);
}

#[tokio::test]
async fn reconnect_supersedes_without_going_offline() {
    let (addr, registry, _dir) = spawn_server().await;
    let u1 = Uuid::new_v4();

    let mut ws_old = connect(addr, u1).await;
    assert_eq!(next_online_users(&mut ws_old).await, vec![u1]);
    let old_conn = registry.lookup(u1).expect("registered").id();

    // Reconnect: the new connection replaces the old mapping. Dropping the
    // old handle's sender ends the old pump, so the server tears that
    // connection down on its own.
    let mut ws_new = connect(addr, u1).await;
    assert_eq!(next_online_users(&mut ws_new).await, vec![u1]);
    read_until_closed(ws_old).await;

    // The old connection's teardown ran its unregister; the identity check
    // must have kept the new mapping in place.
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(registry.lookup(u1).is_some(), "user went offline");
    }
    let new_conn = registry.lookup(u1).expect("still registered").id();
    assert_ne!(new_conn, old_conn);

    // Closing the new connection is what finally takes the user offline.
    ws_new.close(None).await.unwrap();
    read_until_closed(ws_new).await;
    wait_for_online_count(&registry, 0).await;
}

#[tokio::test]
async fn malformed_user_id_is_rejected_before_upgrade() {
    let (addr, registry, _dir) = spawn_server().await;

    for url in [
        format!("ws://{}/ws", addr),
        format!("ws://{}/ws?userId=not-a-uuid", addr),
    ] {
        match connect_async(url).await {
            Err(tungstenite::Error::Http(response)) => {
                assert_eq!(response.status(), 400);
            }
            other => panic!("expected HTTP 400 rejection, got {:?}", other),
        }
    }

    assert!(registry.snapshot().is_empty());
}
