mod body;
mod path;
mod query;

pub use body::RawBody;
pub use path::KeyPath;
pub use query::QueryPairs;
