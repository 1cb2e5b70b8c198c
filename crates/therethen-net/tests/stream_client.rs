mod common;

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::sync::mpsc;
use tokio::time::timeout;

use therethen_net::{ConnectionState, StreamClient, StreamError};

use common::spawn_backend;

const WAIT: Duration = Duration::from_secs(5);

async fn upgrade(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(echo)
}

/// Echo text frames back with a prefix, each preceded by a binary frame.
/// `"bye"` makes the server close the connection.
async fn echo(mut socket: WebSocket) {
    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) if text == "bye" => {
                let _ = socket.send(Message::Close(None)).await;
                return;
            }
            Message::Text(text) => {
                if socket.send(Message::Binary(vec![1, 2, 3])).await.is_err() {
                    return;
                }
                if socket.send(Message::Text(format!("echo:{text}"))).await.is_err() {
                    return;
                }
            }
            Message::Close(_) => return,
            _ => {}
        }
    }
}

const FLOOD_FRAMES: usize = 600;

async fn upgrade_flood(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(flood)
}

/// Push more text frames than the client buffers, then idle until closed.
async fn flood(mut socket: WebSocket) {
    for i in 0..FLOOD_FRAMES {
        if socket.send(Message::Text(format!("frame-{i}"))).await.is_err() {
            return;
        }
    }
    while let Some(Ok(msg)) = socket.recv().await {
        if matches!(msg, Message::Close(_)) {
            return;
        }
    }
}

async fn stream_client() -> StreamClient {
    let router = Router::new()
        .route("/ws/chat/", get(upgrade))
        .route("/ws/flood/", get(upgrade_flood));
    let addr = spawn_backend(router).await;
    StreamClient::new(format!("ws://{addr}/ws/chat/"))
}

async fn flood_client() -> StreamClient {
    let client = stream_client().await;
    let url = client.url().replace("/ws/chat/", "/ws/flood/");
    StreamClient::new(url)
}

async fn wait_disconnected(client: &StreamClient) {
    let mut states = client.subscribe_state();
    timeout(WAIT, states.wait_for(|s| *s == ConnectionState::Disconnected))
        .await
        .expect("stream did not disconnect")
        .unwrap();
}

#[tokio::test]
async fn test_text_frames_delivered_in_order() {
    let mut client = stream_client().await;
    let mut inbound = client.connect().await.unwrap();
    assert_eq!(client.state(), ConnectionState::Connected);

    client.send("one");
    client.send("two");

    // Binary frames in between are skipped.
    assert_eq!(timeout(WAIT, inbound.recv()).await.unwrap().unwrap(), "echo:one");
    assert_eq!(timeout(WAIT, inbound.recv()).await.unwrap().unwrap(), "echo:two");

    client.disconnect().await;
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert!(timeout(WAIT, inbound.recv()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_second_connect_is_rejected() {
    let mut client = stream_client().await;
    let _inbound = client.connect().await.unwrap();
    assert!(matches!(
        client.connect().await,
        Err(StreamError::AlreadyConnected)
    ));
    client.disconnect().await;
}

#[tokio::test]
async fn test_server_close_ends_session() {
    let mut client = stream_client().await;
    let mut inbound = client.connect().await.unwrap();

    client.send("bye");
    assert!(timeout(WAIT, inbound.recv()).await.unwrap().is_none());
    wait_disconnected(&client).await;

    // Sends after the drop are swallowed.
    client.send("anyone there?");

    // A fresh session can be opened on the same client.
    client.disconnect().await;
    let mut inbound = client.connect().await.unwrap();
    client.send("again");
    assert_eq!(timeout(WAIT, inbound.recv()).await.unwrap().unwrap(), "echo:again");
    client.disconnect().await;
}

#[tokio::test]
async fn test_handler_sees_each_frame_once() {
    let mut client = stream_client().await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    client
        .connect_with_handler(move |text| {
            let _ = tx.send(text);
        })
        .await
        .unwrap();

    client.send("a");
    client.send("b");
    assert_eq!(timeout(WAIT, rx.recv()).await.unwrap().unwrap(), "echo:a");
    assert_eq!(timeout(WAIT, rx.recv()).await.unwrap().unwrap(), "echo:b");

    client.disconnect().await;
    assert!(timeout(WAIT, rx.recv()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_disconnect_with_undrained_receiver() {
    let mut client = flood_client().await;
    let _inbound = client.connect().await.unwrap();

    // Let the inbound buffer fill up.
    tokio::time::sleep(Duration::from_millis(300)).await;

    timeout(WAIT, client.disconnect())
        .await
        .expect("disconnect blocked on a full receiver");
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_slow_receiver_gets_every_frame_in_order() {
    let mut client = flood_client().await;
    let mut inbound = client.connect().await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    for i in 0..FLOOD_FRAMES {
        let text = timeout(WAIT, inbound.recv()).await.unwrap().unwrap();
        assert_eq!(text, format!("frame-{i}"));
    }
    client.disconnect().await;
}
