//! Commands produced by routing and the outcomes the CRUD service returns for them.

use crate::store::Record;
use axum::body::Bytes;
use serde_json::Value;

/// One request, classified once by method and path shape.
#[derive(Debug)]
pub enum Command {
    List { filter: Option<bool> },
    Get { key: String },
    /// `key` is empty when the request carried none.
    Create { key: String, fields: Record },
    Update { key: String, source: PatchSource },
    Remove { key: String },
}

/// Raw update inputs: the query side channel and the request body.
#[derive(Debug, Default)]
pub struct PatchSource {
    pub query: Vec<(String, String)>,
    pub body: Bytes,
}

/// The update channel chosen for a request.
#[derive(Debug, PartialEq)]
pub enum Patch {
    /// Overwrite exactly one allow-listed field.
    Field { name: &'static str, value: Value },
    /// Shallow-merge every payload key onto the record.
    Merge(Record),
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Listed(Vec<Value>),
    Found(Record),
    Created(Record),
    Updated(Record),
    Removed(String),
    /// Delete of an absent key.
    NoContent,
}
