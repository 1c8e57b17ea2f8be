//! Load server settings from the environment and seed records from built-ins or a JSON file.

use crate::config::builtin::{book_schema, book_seed, pet_schema, pet_seed};
use crate::config::types::ResourceSchema;
use crate::config::validate_seed;
use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;
pub const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:8000";

/// Which collection a server instance holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Books,
    Pets,
}

impl Collection {
    pub fn schema(self) -> ResourceSchema {
        match self {
            Collection::Books => book_schema(),
            Collection::Pets => pet_schema(),
        }
    }

    pub fn builtin_seed(self) -> Vec<Map<String, Value>> {
        match self {
            Collection::Books => book_seed(),
            Collection::Pets => pet_seed(),
        }
    }
}

impl std::str::FromStr for Collection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "books" | "book" => Ok(Collection::Books),
            "pets" | "pet" => Ok(Collection::Pets),
            _ => Err(ConfigError::InvalidSchema(s.to_string())),
        }
    }
}

/// What the process serves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerMode {
    /// In-memory store server for one collection.
    Store(Collection),
    /// Pass-through to an upstream store server.
    Proxy,
}

impl ServerMode {
    fn default_port(&self) -> u16 {
        match self {
            ServerMode::Store(Collection::Books) => 3000,
            ServerMode::Store(Collection::Pets) => 8000,
            ServerMode::Proxy => 8080,
        }
    }
}

impl std::str::FromStr for ServerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "books" => Ok(ServerMode::Store(Collection::Books)),
            "pets" => Ok(ServerMode::Store(Collection::Pets)),
            "proxy" => Ok(ServerMode::Proxy),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub mode: ServerMode,
    pub host: String,
    pub port: u16,
    pub seed_path: Option<PathBuf>,
    pub upstream: String,
    /// Collection the proxy forwards.
    pub proxy_collection: Collection,
    pub body_limit: usize,
}

impl ServerConfig {
    /// Read `CATALOG_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mode: ServerMode = match get("CATALOG_MODE") {
            Some(s) => s.parse()?,
            None => ServerMode::Store(Collection::Books),
        };
        let port = match get("CATALOG_PORT") {
            Some(s) => s
                .parse()
                .map_err(|_| ConfigError::InvalidVar { var: "CATALOG_PORT", value: s })?,
            None => mode.default_port(),
        };
        let body_limit = match get("CATALOG_BODY_LIMIT") {
            Some(s) => s
                .parse()
                .map_err(|_| ConfigError::InvalidVar { var: "CATALOG_BODY_LIMIT", value: s })?,
            None => DEFAULT_BODY_LIMIT,
        };
        let proxy_collection = match get("CATALOG_PROXY_SCHEMA") {
            Some(s) => s.parse()?,
            None => Collection::Pets,
        };

        Ok(ServerConfig {
            mode,
            host: get("CATALOG_HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port,
            seed_path: get("CATALOG_SEED_PATH").map(PathBuf::from),
            upstream: get("CATALOG_UPSTREAM")
                .unwrap_or_else(|| DEFAULT_UPSTREAM.into())
                .trim_end_matches('/')
                .to_string(),
            proxy_collection,
            body_limit,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Seed records for a collection: the JSON file at `path` if given, otherwise the built-ins.
pub async fn load_seed(
    collection: Collection,
    path: Option<&Path>,
) -> Result<Vec<Map<String, Value>>, ConfigError> {
    let Some(path) = path else {
        return Ok(collection.builtin_seed());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    parse_seed(&collection.schema(), &raw)
}

/// Parse and validate a JSON array of seed records.
pub fn parse_seed(schema: &ResourceSchema, raw: &str) -> Result<Vec<Map<String, Value>>, ConfigError> {
    let values: Vec<Value> = serde_json::from_str(raw).map_err(|e| ConfigError::Load(e.to_string()))?;
    validate_seed(schema, &values)?;
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(m) => Some(m),
            _ => None,
        })
        .collect())
}
