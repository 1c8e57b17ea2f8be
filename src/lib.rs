//! Catalog API: in-memory REST CRUD over book or pet records, plus a pass-through proxy.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod proxy;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::{proxy_app, store_app};
pub use config::{load_seed, Collection, ResourceSchema, ServerConfig, ServerMode};
pub use error::{AppError, ConfigError};
pub use logging::init_tracing;
pub use proxy::ProxyState;
pub use service::{Command, CrudService, Outcome};
pub use state::AppState;
pub use store::{Record, Store};
