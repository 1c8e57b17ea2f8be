//! Pass-through handlers: re-forward each call to the upstream store server.

use crate::error::AppError;
use crate::extractors::KeyPath;
use crate::proxy::{ProxyState, Relayed};
use crate::service::coerce;
use axum::extract::State;
use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Coerce the path-parameter fields of a create/update route into a JSON object,
/// optionally leaving out the key.
fn path_body(state: &ProxyState, params: &HashMap<String, String>, with_key: bool) -> Result<Value, AppError> {
    let schema = &state.schema;
    let mut body = Map::new();
    for name in &schema.create_path {
        if !with_key && *name == schema.key_field {
            continue;
        }
        let (Some(field), Some(raw)) = (schema.field(name), params.get(*name)) else {
            continue;
        };
        body.insert(field.name.to_string(), coerce(field, raw)?);
    }
    Ok(Value::Object(body))
}

fn path_key(state: &ProxyState, params: &HashMap<String, String>) -> String {
    params.get(state.schema.key_field).cloned().unwrap_or_default()
}

/// GET /<collection>
pub async fn list(State(state): State<ProxyState>) -> Result<Relayed, AppError> {
    let upstream = &state.upstream;
    let context = format!("Error (GET /{})", state.schema.path_segment);
    upstream.send(Method::GET, upstream.collection_url().clone(), None, context).await
}

/// GET /<collection>/:key
pub async fn read(State(state): State<ProxyState>, KeyPath(key): KeyPath<String>) -> Result<Relayed, AppError> {
    let upstream = &state.upstream;
    let context = format!("Error fetching {}", key);
    upstream.send(Method::GET, upstream.item_url(&key), None, context).await
}

/// DELETE /<collection>/:key
pub async fn delete(State(state): State<ProxyState>, KeyPath(key): KeyPath<String>) -> Result<Relayed, AppError> {
    let upstream = &state.upstream;
    let context = format!("Error deleting {}", key);
    upstream.send(Method::DELETE, upstream.item_url(&key), None, context).await
}

/// POST /<collection>/<create path fields...> -> POST /<collection> with a JSON body.
pub async fn create(
    State(state): State<ProxyState>,
    KeyPath(params): KeyPath<HashMap<String, String>>,
) -> Result<Relayed, AppError> {
    let body = path_body(&state, &params, true)?;
    let upstream = &state.upstream;
    let context = format!("Error creating {}", path_key(&state, &params));
    upstream
        .send(Method::POST, upstream.collection_url().clone(), Some(&body), context)
        .await
}

/// PUT /<collection>/<create path fields...> -> PUT /<collection>/:key with the non-key fields.
pub async fn update(
    State(state): State<ProxyState>,
    KeyPath(params): KeyPath<HashMap<String, String>>,
) -> Result<Relayed, AppError> {
    let body = path_body(&state, &params, false)?;
    let key = path_key(&state, &params);
    let upstream = &state.upstream;
    let context = format!("Error updating {}", key);
    upstream.send(Method::PUT, upstream.item_url(&key), Some(&body), context).await
}
