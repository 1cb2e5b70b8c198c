//! In-process mock backend for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use serde_json::{json, Value};

use therethen_net::{ApiClient, AuthSession, ClientConfig};

/// Serve `router` on an ephemeral local port.
pub async fn spawn_backend(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn client_for(addr: SocketAddr, session: AuthSession) -> ApiClient {
    let config = ClientConfig::for_base(
        format!("http://{addr}/api"),
        format!("ws://{addr}/ws/chat/"),
    );
    ApiClient::new(&config, session).unwrap()
}

pub fn user_json() -> Value {
    json!({
        "id": "u-1",
        "email": "ada@example.com",
        "username": "ada",
        "first_name": "Ada",
        "is_verified": true,
        "created_at": "2025-08-13T10:00:00Z"
    })
}

pub fn area_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Drawn Area",
        "geometry_wkt": "POLYGON((10 10, 11 10, 11 9, 10 9, 10 10))",
        "start_year": 2020,
        "end_year": 2024
    })
}
