pub mod types;
pub mod builtin;
pub mod loader;
pub mod validator;

pub use types::*;
pub use builtin::*;
pub use loader::*;
pub use validator::*;
