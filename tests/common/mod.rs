#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use catalog_api::{store_app, AppState, Collection, Store};
use tokio::net::TcpListener;

pub const BODY_LIMIT: usize = 64 * 1024;

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn spawn(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(format!("http://{}", addr))
}

/// A store server seeded with the built-in records of `collection`.
pub async fn spawn_store(collection: Collection) -> anyhow::Result<String> {
    let store = Store::with_seed(Arc::new(collection.schema()), collection.builtin_seed())?;
    spawn(store_app(AppState::new(store), BODY_LIMIT)).await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}
