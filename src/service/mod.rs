//! Command execution over the in-memory store.

mod command;
mod crud;
mod validation;
pub use command::{Command, Outcome, Patch, PatchSource};
pub use crud::CrudService;
pub use validation::{coerce, key_from_value, parse_object, RequestValidator};
