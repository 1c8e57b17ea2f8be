//! Store server handlers. Each one classifies its request into a `Command` and runs it.

use crate::error::AppError;
use crate::extractors::{KeyPath, QueryPairs, RawBody};
use crate::response::outcome_response;
use crate::service::{
    coerce, key_from_value, parse_object, Command, CrudService, Outcome, PatchSource, RequestValidator,
};
use crate::state::AppState;
use crate::store::Record;
use axum::{extract::State, response::Response};
use std::collections::HashMap;

/// Reads share the lock; anything that may mutate holds the write lock for its whole check-then-apply.
fn run(state: &AppState, command: Command) -> Result<Response, AppError> {
    let outcome = match command {
        Command::List { filter } => Outcome::Listed(CrudService::list(&state.read(), filter)),
        Command::Get { key } => {
            let store = state.read();
            Outcome::Found(CrudService::get(&store, &key)?.clone())
        }
        command => CrudService::execute(&mut state.write(), command)?,
    };
    Ok(outcome_response(&state.schema, outcome))
}

/// GET /<collection>[?<filter>=true|false]
pub async fn list(State(state): State<AppState>, QueryPairs(query): QueryPairs) -> Result<Response, AppError> {
    let filter = RequestValidator::list_filter(&state.schema, &query);
    run(&state, Command::List { filter })
}

/// GET /<collection>/:key
pub async fn read(State(state): State<AppState>, KeyPath(key): KeyPath<String>) -> Result<Response, AppError> {
    run(&state, Command::Get { key })
}

/// POST /<collection> with a JSON object carrying the key field.
pub async fn create_from_body(State(state): State<AppState>, RawBody(body): RawBody) -> Result<Response, AppError> {
    let fields = parse_object(&body)?;
    let key = key_from_value(fields.get(state.schema.key_field));
    run(&state, Command::Create { key, fields })
}

/// POST /<collection>/<create path fields...>, e.g. /books/:id/:title/:author/:publisher/:isbn
pub async fn create_from_path(
    State(state): State<AppState>,
    KeyPath(params): KeyPath<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let schema = &state.schema;
    let key = params.get(schema.key_field).cloned().unwrap_or_default();
    let mut fields = Record::new();
    for name in schema.create_path.iter().filter(|n| **n != schema.key_field) {
        let (Some(field), Some(raw)) = (schema.field(name), params.get(*name)) else {
            continue;
        };
        fields.insert(field.name.to_string(), coerce(field, raw)?);
    }
    run(&state, Command::Create { key, fields })
}

/// PUT /<collection>/:key, with one `?field=value` or a JSON body to merge.
pub async fn update(
    State(state): State<AppState>,
    KeyPath(key): KeyPath<String>,
    QueryPairs(query): QueryPairs,
    RawBody(body): RawBody,
) -> Result<Response, AppError> {
    run(
        &state,
        Command::Update {
            key,
            source: PatchSource { query, body },
        },
    )
}

/// DELETE /<collection>/:key
pub async fn delete(State(state): State<AppState>, KeyPath(key): KeyPath<String>) -> Result<Response, AppError> {
    run(&state, Command::Remove { key })
}
