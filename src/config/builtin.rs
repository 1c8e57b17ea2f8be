//! Built-in schemas and seed data for the book and pet catalogs.

use crate::config::types::{FieldKind, FieldSpec, ResourceSchema};
use serde_json::{json, Map, Value};

pub fn book_schema() -> ResourceSchema {
    ResourceSchema {
        name: "Book",
        path_segment: "books",
        key_field: "id",
        display_field: "title",
        filter_field: Some("avail"),
        fields: vec![
            FieldSpec::new("id", FieldKind::Text).not_queryable(),
            FieldSpec::new("title", FieldKind::Text),
            FieldSpec::new("author", FieldKind::Text),
            FieldSpec::new("publisher", FieldKind::Text),
            FieldSpec::new("isbn", FieldKind::Text),
            FieldSpec::new("avail", FieldKind::Bool).aliases(&["availability"]),
            FieldSpec::new("who", FieldKind::NullableText).aliases(&["borrower"]),
            FieldSpec::new("due", FieldKind::NullableText).aliases(&["dueDate"]),
        ],
        create_path: vec!["id", "title", "author", "publisher", "isbn"],
        create_defaults: vec![
            ("avail", Value::Bool(true)),
            ("who", Value::Null),
            ("due", Value::Null),
        ],
    }
}

pub fn pet_schema() -> ResourceSchema {
    ResourceSchema {
        name: "Pet",
        path_segment: "pets",
        key_field: "name",
        display_field: "breed",
        filter_field: None,
        fields: vec![
            FieldSpec::new("name", FieldKind::Text).not_queryable(),
            FieldSpec::new("breed", FieldKind::Text),
            FieldSpec::new("age", FieldKind::Int),
        ],
        create_path: vec!["name", "breed", "age"],
        create_defaults: Vec::new(),
    }
}

fn book(
    id: &str,
    title: &str,
    author: &str,
    publisher: &str,
    isbn: &str,
    loan: Option<(&str, &str)>,
) -> Map<String, Value> {
    let (avail, who, due) = match loan {
        Some((who, due)) => (false, json!(who), json!(due)),
        None => (true, Value::Null, Value::Null),
    };
    let mut record = Map::new();
    record.insert("id".into(), json!(id));
    record.insert("title".into(), json!(title));
    record.insert("author".into(), json!(author));
    record.insert("publisher".into(), json!(publisher));
    record.insert("isbn".into(), json!(isbn));
    record.insert("avail".into(), json!(avail));
    record.insert("who".into(), who);
    record.insert("due".into(), due);
    record
}

pub fn book_seed() -> Vec<Map<String, Value>> {
    vec![
        book("1", "Reactions in REACT", "Ben Dover", "Random House", "978-3-16-148410-0", None),
        book("2", "Express-sions", "Frieda Livery", "Chaotic House", "978-3-16-148410-2", None),
        book("3", "Restful REST", "Al Gorithm", "ACM", "978-3-16-143310-1", None),
        book("4", "See Essess", "Anna Log", "O'Reilly", "987-6-54-148220-1", Some(("Homer", "1/1/23"))),
        book("5", "Scripting in JS", "Dee Gital", "IEEE", "987-6-54-321123-1", Some(("Marge", "1/2/23"))),
        book("6", "Be An HTML Hero", "Jen Neric", "Coders-R-Us", "987-6-54-321123-2", Some(("Lisa", "1/3/23"))),
    ]
}

pub fn pet_seed() -> Vec<Map<String, Value>> {
    [("Barky", "Golden Retriever", 3), ("Whiskers", "Tabby", 5), ("Nibbles", "Dwarf Rabbit", 1)]
        .into_iter()
        .map(|(name, breed, age)| {
            let mut record = Map::new();
            record.insert("name".into(), json!(name));
            record.insert("breed".into(), json!(breed));
            record.insert("age".into(), json!(age));
            record
        })
        .collect()
}
