//! In-memory record store: key -> record, iterated in insertion order.

use crate::config::{validate_seed, ResourceSchema};
use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub type Record = Map<String, Value>;

#[derive(Debug)]
pub struct Store {
    schema: Arc<ResourceSchema>,
    records: HashMap<String, Record>,
    /// Insertion order of keys; list results follow it.
    order: Vec<String>,
}

impl Store {
    pub fn new(schema: Arc<ResourceSchema>) -> Self {
        Store {
            schema,
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Build a store from validated seed records.
    pub fn with_seed(schema: Arc<ResourceSchema>, seed: Vec<Record>) -> Result<Self, ConfigError> {
        let values: Vec<Value> = seed.into_iter().map(Value::Object).collect();
        validate_seed(&schema, &values)?;
        let mut store = Store::new(schema);
        for value in values {
            if let Value::Object(record) = value {
                let key = record
                    .get(store.schema.key_field)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                store.insert(key, record);
            }
        }
        tracing::debug!(collection = store.schema.path_segment, records = store.len(), "store seeded");
        Ok(store)
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn shared_schema(&self) -> Arc<ResourceSchema> {
        Arc::clone(&self.schema)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.records.get_mut(key)
    }

    /// Insert a record; callers check for collisions first. Replacing keeps the original position.
    pub fn insert(&mut self, key: String, record: Record) {
        if self.records.insert(key.clone(), record).is_none() {
            self.order.push(key);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Record> {
        let removed = self.records.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.order.iter().filter_map(|k| self.records.get(k))
    }
}
