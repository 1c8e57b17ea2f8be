pub mod common;
pub mod proxy;
pub mod resource;

pub use common::{common_routes, cors, method_not_allowed, reject_oversized};
pub use proxy::proxy_routes;
pub use resource::resource_routes;
