//! Response bodies for command outcomes.

use crate::config::ResourceSchema;
use crate::service::Outcome;
use crate::store::Record;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

/// `{ "message": "Book 7 created", "book": { ... } }`
pub fn record_envelope(schema: &ResourceSchema, key: &str, verb: &str, record: Record) -> Value {
    let mut body = Map::new();
    body.insert("message".into(), Value::String(format!("{} {} {}", schema.name, key, verb)));
    body.insert(schema.envelope_key(), Value::Object(record));
    Value::Object(body)
}

pub fn outcome_response(schema: &ResourceSchema, outcome: Outcome) -> Response {
    match outcome {
        Outcome::Listed(summaries) => (StatusCode::OK, Json(summaries)).into_response(),
        Outcome::Found(record) => (StatusCode::OK, Json(record)).into_response(),
        Outcome::Created(record) => {
            let key = record_key(schema, &record);
            (StatusCode::CREATED, Json(record_envelope(schema, &key, "created", record))).into_response()
        }
        Outcome::Updated(record) => {
            let key = record_key(schema, &record);
            (StatusCode::OK, Json(record_envelope(schema, &key, "updated", record))).into_response()
        }
        Outcome::Removed(key) => (
            StatusCode::OK,
            Json(Message {
                message: format!("{} with {} {} deleted", schema.name, schema.key_field, key),
            }),
        )
            .into_response(),
        Outcome::NoContent => StatusCode::NO_CONTENT.into_response(),
    }
}

fn record_key(schema: &ResourceSchema, record: &Record) -> String {
    record
        .get(schema.key_field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
