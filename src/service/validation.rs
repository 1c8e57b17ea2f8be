//! Boundary checks: query allow-listing, narrow string coercion, and body parsing.

use crate::config::{FieldKind, FieldSpec, ResourceSchema};
use crate::error::AppError;
use crate::service::command::{Patch, PatchSource};
use crate::store::Record;
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// List filter from the query: only the literal strings "true"/"false" on the
    /// schema's filter field count; anything else means no filter.
    pub fn list_filter(schema: &ResourceSchema, query: &[(String, String)]) -> Option<bool> {
        let field = schema.filter_field?;
        let (_, raw) = query.iter().find(|(k, _)| k == field)?;
        match raw.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Choose the update channel. Every query key must name a queryable field; when
    /// any does, the first such field in schema order is the whole update. Otherwise
    /// the body is merged.
    pub fn resolve_patch(schema: &ResourceSchema, source: &PatchSource) -> Result<Patch, AppError> {
        let mut invalid: Vec<&str> = Vec::new();
        for (name, _) in &source.query {
            if schema.queryable_field(name).is_none() && !invalid.contains(&name.as_str()) {
                invalid.push(name);
            }
        }
        if !invalid.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Invalid query field{}: {}",
                if invalid.len() > 1 { "s" } else { "" },
                invalid.join(", ")
            )));
        }

        for field in schema.fields.iter().filter(|f| f.queryable) {
            if let Some((_, raw)) = source.query.iter().find(|(k, _)| field.answers_to(k)) {
                return Ok(Patch::Field {
                    name: field.name,
                    value: coerce(field, raw)?,
                });
            }
        }

        Ok(Patch::Merge(parse_object(&source.body)?))
    }
}

/// Coerce a path segment or query value to the field's kind.
/// Bool: exactly "true" is true, anything else false. Int: must parse.
pub fn coerce(field: &FieldSpec, raw: &str) -> Result<Value, AppError> {
    Ok(match field.kind {
        FieldKind::Bool => Value::Bool(raw == "true"),
        FieldKind::Int => {
            let n: i64 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::BadRequest(format!("{} must be an integer", field.name)))?;
            Value::Number(n.into())
        }
        FieldKind::Text | FieldKind::NullableText => Value::String(raw.to_string()),
    })
}

/// Parse a request body as a JSON object. An empty body is an empty object.
pub fn parse_object(body: &[u8]) -> Result<Record, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Record::new());
    }
    match serde_json::from_slice::<Value>(body).map_err(AppError::MalformedPayload)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Key carried in a JSON value: strings as-is, numbers stringified, anything else empty.
pub fn key_from_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
