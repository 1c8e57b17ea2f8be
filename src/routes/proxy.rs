//! Pass-through routes mirroring the store server's collection paths.

use crate::handlers::proxy::{create, delete, list, read, update};
use crate::proxy::ProxyState;
use crate::routes::common::method_not_allowed;
use axum::{
    routing::{get, post},
    Router,
};

pub fn proxy_routes(state: ProxyState) -> Router {
    let schema = state.schema.clone();
    Router::new()
        .route(&schema.collection_route(), get(list).fallback(method_not_allowed))
        .route(
            &schema.item_route(),
            get(read).delete(delete).fallback(method_not_allowed),
        )
        .route(
            &schema.create_route(),
            post(create).put(update).fallback(method_not_allowed),
        )
        .with_state(state)
}
