//! Resource schema types: the shape of one record collection.

use serde_json::{Map, Value};

/// Value kind of a record field. Drives the narrow string coercion applied to
/// path segments and query parameters; JSON bodies are taken as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text that may be null (e.g. borrower, due date).
    NullableText,
    Bool,
    Int,
}

#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Alternative names accepted on the query channel.
    pub aliases: &'static [&'static str],
    /// Whether the field may be set through the single-field query channel.
    pub queryable: bool,
}

impl FieldSpec {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            kind,
            aliases: &[],
            queryable: true,
        }
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn not_queryable(mut self) -> Self {
        self.queryable = false;
        self
    }

    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

/// Shape of one collection: key, display field, filterable flag, and the fields
/// a create forces regardless of input.
#[derive(Clone, Debug)]
pub struct ResourceSchema {
    /// Singular display name used in messages ("Book").
    pub name: &'static str,
    /// Collection path segment ("books").
    pub path_segment: &'static str,
    pub key_field: &'static str,
    pub display_field: &'static str,
    /// Boolean field usable as `?field=true|false` on list.
    pub filter_field: Option<&'static str>,
    /// Fields in record order. The key field is first.
    pub fields: Vec<FieldSpec>,
    /// Fields carried as path segments by the path-parameter create route, in order.
    pub create_path: Vec<&'static str>,
    /// Values forced onto every newly created record.
    pub create_defaults: Vec<(&'static str, Value)>,
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolve a query parameter name (canonical or alias) to a queryable field.
    pub fn queryable_field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.queryable && f.answers_to(name))
    }

    /// Lower-case singular, used as the record's key in response envelopes ("book").
    pub fn envelope_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Route pattern for path-parameter creates, e.g. `/books/:id/:title/:author/:publisher/:isbn`.
    pub fn create_route(&self) -> String {
        let mut route = format!("/{}", self.path_segment);
        for field in &self.create_path {
            route.push_str("/:");
            route.push_str(field);
        }
        route
    }

    /// Route pattern for single-record operations, e.g. `/books/:id`.
    pub fn item_route(&self) -> String {
        format!("/{}/:{}", self.path_segment, self.key_field)
    }

    pub fn collection_route(&self) -> String {
        format!("/{}", self.path_segment)
    }

    /// Summary projection: key plus display field.
    pub fn summarize(&self, record: &Map<String, Value>) -> Value {
        let mut out = Map::new();
        out.insert(
            self.key_field.to_string(),
            record.get(self.key_field).cloned().unwrap_or(Value::Null),
        );
        out.insert(
            self.display_field.to_string(),
            record.get(self.display_field).cloned().unwrap_or(Value::Null),
        );
        Value::Object(out)
    }
}
