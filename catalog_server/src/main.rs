//! Catalog server: serves the book or pet catalog from memory, or proxies one.
//!
//! Configured through `CATALOG_*` environment variables (a `.env` file is honoured):
//! `CATALOG_MODE=books|pets|proxy`, `CATALOG_HOST`, `CATALOG_PORT`, `CATALOG_SEED_PATH`,
//! `CATALOG_UPSTREAM`, `CATALOG_PROXY_SCHEMA`, `CATALOG_BODY_LIMIT`.

use catalog_api::{
    init_tracing, load_seed, proxy_app, store_app, AppState, ProxyState, ServerConfig, ServerMode, Store,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("catalog_api=info,catalog_server=info,tower_http=info");

    let config = ServerConfig::from_env()?;
    let app = match config.mode {
        ServerMode::Store(collection) => {
            let seed = load_seed(collection, config.seed_path.as_deref()).await?;
            let store = Store::with_seed(Arc::new(collection.schema()), seed)?;
            tracing::info!(collection = ?collection, records = store.len(), "store ready");
            store_app(AppState::new(store), config.body_limit)
        }
        ServerMode::Proxy => {
            let state = ProxyState::new(config.proxy_collection.schema(), &config.upstream)?;
            tracing::info!(upstream = %config.upstream, collection = ?config.proxy_collection, "proxy ready");
            proxy_app(state, config.body_limit)
        }
    };

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
