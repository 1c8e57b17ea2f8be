//! Seed validation: every record must be an object keyed by a unique, non-empty string.

use crate::config::types::ResourceSchema;
use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Check seed records against the schema before the store is built from them.
pub fn validate_seed(schema: &ResourceSchema, seed: &[Value]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for (index, value) in seed.iter().enumerate() {
        let record = value.as_object().ok_or_else(|| ConfigError::InvalidSeed {
            index,
            reason: "record must be a JSON object".into(),
        })?;
        let key = seed_key(schema, record).ok_or_else(|| ConfigError::InvalidSeed {
            index,
            reason: format!("missing or empty string '{}'", schema.key_field),
        })?;
        if let Some(field) = record.keys().find(|k| schema.field(k).is_none()) {
            tracing::warn!(index, field = %field, "seed record carries a field outside the schema");
        }
        if !seen.insert(key.to_string()) {
            return Err(ConfigError::DuplicateKey(key.to_string()));
        }
    }
    Ok(())
}

fn seed_key<'a>(schema: &ResourceSchema, record: &'a Map<String, Value>) -> Option<&'a str> {
    record
        .get(schema.key_field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
