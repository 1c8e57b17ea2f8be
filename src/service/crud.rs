//! CRUD execution against the in-memory store.

use crate::error::AppError;
use crate::service::command::{Command, Outcome, Patch, PatchSource};
use crate::service::validation::{key_from_value, RequestValidator};
use crate::store::{Record, Store};
use serde_json::Value;

pub struct CrudService;

impl CrudService {
    /// Run one command. Every failure is detected before the store is touched.
    pub fn execute(store: &mut Store, command: Command) -> Result<Outcome, AppError> {
        tracing::debug!(collection = store.schema().path_segment, ?command, "execute");
        match command {
            Command::List { filter } => Ok(Outcome::Listed(Self::list(store, filter))),
            Command::Get { key } => Self::get(store, &key).cloned().map(Outcome::Found),
            Command::Create { key, fields } => Self::create(store, key, fields).map(Outcome::Created),
            Command::Update { key, source } => Self::update(store, &key, &source).map(Outcome::Updated),
            Command::Remove { key } => Ok(Self::remove(store, &key)),
        }
    }

    /// Summaries of every record, or of those whose filter field equals `filter`.
    pub fn list(store: &Store, filter: Option<bool>) -> Vec<Value> {
        let schema = store.schema();
        store
            .iter()
            .filter(|record| match (filter, schema.filter_field) {
                (Some(flag), Some(field)) => record.get(field) == Some(&Value::Bool(flag)),
                _ => true,
            })
            .map(|record| schema.summarize(record))
            .collect()
    }

    pub fn get<'a>(store: &'a Store, key: &str) -> Result<&'a Record, AppError> {
        store.get(key).ok_or_else(|| not_found(store))
    }

    /// Build a record in schema order: key, forced defaults, then supplied values.
    /// Fields outside the schema are dropped.
    pub fn create(store: &mut Store, key: String, mut fields: Record) -> Result<Record, AppError> {
        let schema = store.schema();
        if key.is_empty() {
            return Err(AppError::BadRequest(format!("Missing {}", schema.key_field)));
        }
        if store.contains(&key) {
            return Err(AppError::Conflict(format!(
                "{} with {} {} already exists",
                schema.name, schema.key_field, key
            )));
        }

        let mut record = Record::new();
        for field in &schema.fields {
            let value = if field.name == schema.key_field {
                Value::String(key.clone())
            } else if let Some((_, forced)) = schema.create_defaults.iter().find(|(n, _)| *n == field.name) {
                forced.clone()
            } else {
                fields.remove(field.name).unwrap_or(Value::Null)
            };
            record.insert(field.name.to_string(), value);
        }

        tracing::info!(collection = schema.path_segment, key = %key, "record created");
        store.insert(key, record.clone());
        Ok(record)
    }

    pub fn update(store: &mut Store, key: &str, source: &PatchSource) -> Result<Record, AppError> {
        if !store.contains(key) {
            return Err(not_found(store));
        }
        let patch = RequestValidator::resolve_patch(store.schema(), source)?;
        Self::apply(store, key, patch)
    }

    /// Apply an already-resolved patch. The key field may only be "changed" to its current value,
    /// compared the way create reads keys, so `2` and `"2"` are the same key.
    pub fn apply(store: &mut Store, key: &str, patch: Patch) -> Result<Record, AppError> {
        let key_field = store.schema().key_field;
        if let Patch::Merge(map) = &patch {
            if let Some(new_key) = map.get(key_field) {
                if key_from_value(Some(new_key)) != key {
                    return Err(AppError::BadRequest(format!("{} cannot be changed", key_field)));
                }
            }
        }

        let missing = not_found(store);
        let record = store.get_mut(key).ok_or(missing)?;
        match patch {
            Patch::Field { name, value } => {
                record.insert(name.to_string(), value);
            }
            Patch::Merge(map) => {
                for (field, value) in map.into_iter().filter(|(field, _)| *field != key_field) {
                    record.insert(field, value);
                }
            }
        }
        let updated = record.clone();
        tracing::info!(key = %key, "record updated");
        Ok(updated)
    }

    /// Absent keys are not an error: they yield `NoContent`.
    pub fn remove(store: &mut Store, key: &str) -> Outcome {
        match store.remove(key) {
            Some(_) => {
                tracing::info!(key = %key, "record removed");
                Outcome::Removed(key.to_string())
            }
            None => Outcome::NoContent,
        }
    }
}

fn not_found(store: &Store) -> AppError {
    AppError::NotFound(format!("{} not found", store.schema().name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{book_schema, book_seed, pet_schema, pet_seed};
    use axum::body::Bytes;
    use serde_json::json;
    use std::sync::Arc;

    fn books() -> Store {
        Store::with_seed(Arc::new(book_schema()), book_seed()).unwrap()
    }

    fn fields(value: Value) -> Record {
        match value {
            Value::Object(m) => m,
            _ => Record::new(),
        }
    }

    fn query(pairs: &[(&str, &str)]) -> PatchSource {
        PatchSource {
            query: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            body: Bytes::new(),
        }
    }

    #[test]
    fn get_absent_then_create_then_get() {
        let mut store = books();
        assert!(matches!(CrudService::get(&store, "7"), Err(AppError::NotFound(_))));
        CrudService::create(&mut store, "7".into(), fields(json!({"title": "New Book"}))).unwrap();
        assert_eq!(CrudService::get(&store, "7").unwrap()["id"], json!("7"));
    }

    #[test]
    fn duplicate_create_conflicts_and_grows_store_once() {
        let mut store = books();
        let before = store.len();
        CrudService::create(&mut store, "7".into(), Record::new()).unwrap();
        let err = CrudService::create(&mut store, "7".into(), Record::new()).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "Book with id 7 already exists");
        assert_eq!(store.len(), before + 1);
    }

    #[test]
    fn create_requires_key() {
        let mut store = books();
        let err = CrudService::create(&mut store, String::new(), Record::new()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn create_forces_availability_and_clears_loan() {
        let mut store = books();
        let input = fields(json!({
            "title": "New Book",
            "author": "A. Writer",
            "avail": false,
            "who": "Bart",
            "due": "9/9/99",
            "color": "blue"
        }));
        let book = CrudService::create(&mut store, "7".into(), input).unwrap();
        assert_eq!(book["avail"], json!(true));
        assert_eq!(book["who"], Value::Null);
        assert_eq!(book["due"], Value::Null);
        assert_eq!(book["title"], json!("New Book"));
        assert_eq!(book["publisher"], Value::Null);
        assert!(!book.contains_key("color"));
        let order: Vec<&str> = book.keys().map(String::as_str).collect();
        assert_eq!(order, ["id", "title", "author", "publisher", "isbn", "avail", "who", "due"]);
    }

    #[test]
    fn remove_present_and_absent() {
        let mut store = books();
        assert_eq!(CrudService::remove(&mut store, "2"), Outcome::Removed("2".into()));
        assert!(matches!(CrudService::get(&store, "2"), Err(AppError::NotFound(_))));
        let before = store.len();
        assert_eq!(CrudService::remove(&mut store, "99"), Outcome::NoContent);
        assert_eq!(store.len(), before);
    }

    #[test]
    fn invalid_query_field_leaves_record_untouched() {
        let mut store = books();
        let before = store.get("1").cloned();
        let err = CrudService::update(&mut store, "1", &query(&[("color", "red")])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(store.get("1").cloned(), before);
    }

    #[test]
    fn availability_query_sets_boolean() {
        let mut store = books();
        let book = CrudService::update(&mut store, "4", &query(&[("avail", "true")])).unwrap();
        assert_eq!(book["avail"], json!(true));
        let book = CrudService::update(&mut store, "4", &query(&[("avail", "nope")])).unwrap();
        assert_eq!(book["avail"], json!(false));
        CrudService::update(&mut store, "1", &query(&[("avail", "false")])).unwrap();
        assert_eq!(CrudService::get(&store, "1").unwrap()["avail"], json!(false));
    }

    #[test]
    fn single_field_channel_only_touches_that_field() {
        let mut store = books();
        let before = store.get("4").cloned().unwrap();
        let book = CrudService::update(&mut store, "4", &query(&[("borrower", "Bart")])).unwrap();
        assert_eq!(book["who"], json!("Bart"));
        for field in ["title", "author", "publisher", "isbn", "avail", "due"] {
            assert_eq!(book[field], before[field]);
        }
    }

    #[test]
    fn update_absent_key_is_not_found_before_validation() {
        let mut store = books();
        let err = CrudService::update(&mut store, "99", &query(&[("color", "red")])).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn body_merge_is_shallow_and_untyped() {
        let mut store = books();
        let source = PatchSource {
            query: Vec::new(),
            body: Bytes::from_static(br#"{"isbn": 12345, "who": "Ned", "shelf": "B2"}"#),
        };
        let book = CrudService::update(&mut store, "3", &source).unwrap();
        assert_eq!(book["isbn"], json!(12345));
        assert_eq!(book["who"], json!("Ned"));
        assert_eq!(book["shelf"], json!("B2"));
        assert_eq!(book["title"], json!("Restful REST"));
    }

    #[test]
    fn merge_cannot_change_key() {
        let mut store = books();
        let before = store.get("3").cloned();
        let source = PatchSource {
            query: Vec::new(),
            body: Bytes::from_static(br#"{"id": "33", "title": "Changed"}"#),
        };
        let err = CrudService::update(&mut store, "3", &source).unwrap_err();
        assert_eq!(err.to_string(), "id cannot be changed");
        assert_eq!(store.get("3").cloned(), before);

        let same = PatchSource {
            query: Vec::new(),
            body: Bytes::from_static(br#"{"id": "3", "title": "Changed"}"#),
        };
        assert_eq!(CrudService::update(&mut store, "3", &same).unwrap()["title"], json!("Changed"));
    }

    #[test]
    fn numeric_key_in_merge_matches_string_key() {
        let mut store = books();
        let source = PatchSource {
            query: Vec::new(),
            body: Bytes::from_static(br#"{"id": 2, "title": "Renumbered"}"#),
        };
        let book = CrudService::update(&mut store, "2", &source).unwrap();
        assert_eq!(book["title"], json!("Renumbered"));
        assert_eq!(book["id"], json!("2"));

        let other = PatchSource {
            query: Vec::new(),
            body: Bytes::from_static(br#"{"id": 20}"#),
        };
        let err = CrudService::update(&mut store, "2", &other).unwrap_err();
        assert_eq!(err.to_string(), "id cannot be changed");
    }

    #[test]
    fn list_counts_and_filters() {
        let store = books();
        assert_eq!(CrudService::list(&store, None).len(), store.len());
        let available = CrudService::list(&store, Some(true));
        assert_eq!(available.len(), 3);
        assert!(available.contains(&json!({"id": "1", "title": "Reactions in REACT"})));
        let loaned = CrudService::list(&store, Some(false));
        assert!(loaned.iter().all(|b| ["4", "5", "6"].contains(&b["id"].as_str().unwrap())));
    }

    #[test]
    fn pets_summarize_by_breed() {
        let mut store = Store::with_seed(Arc::new(pet_schema()), pet_seed()).unwrap();
        let listed = CrudService::list(&store, Some(true));
        assert_eq!(listed[0], json!({"name": "Barky", "breed": "Golden Retriever"}));
        let pet = CrudService::update(&mut store, "Barky", &query(&[("age", "4")])).unwrap();
        assert_eq!(pet["age"], json!(4));
        assert!(CrudService::update(&mut store, "Barky", &query(&[("age", "old")])).is_err());
    }

    #[test]
    fn execute_dispatches_every_command() {
        let mut store = books();
        let listed = CrudService::execute(&mut store, Command::List { filter: None }).unwrap();
        assert!(matches!(listed, Outcome::Listed(ref v) if v.len() == 6));
        let found = CrudService::execute(&mut store, Command::Get { key: "4".into() }).unwrap();
        let Outcome::Found(book) = found else { panic!("expected record") };
        assert_eq!(book["who"], json!("Homer"));
        assert_eq!(book["due"], json!("1/1/23"));
        assert_eq!(book["avail"], json!(false));
        let created = CrudService::execute(
            &mut store,
            Command::Create { key: "7".into(), fields: Record::new() },
        )
        .unwrap();
        assert!(matches!(created, Outcome::Created(_)));
        let removed = CrudService::execute(&mut store, Command::Remove { key: "99".into() }).unwrap();
        assert_eq!(removed, Outcome::NoContent);
    }
}
