//! Store server routes, built from the collection's schema.
//! Single-record and path-parameter create routes share the key's parameter name.

use crate::handlers::resource::{create_from_body, create_from_path, delete, list, read, update};
use crate::routes::common::method_not_allowed;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn resource_routes(state: AppState) -> Router {
    let schema = state.schema.clone();
    Router::new()
        .route(
            &schema.collection_route(),
            get(list).post(create_from_body).fallback(method_not_allowed),
        )
        .route(
            &schema.item_route(),
            get(read).put(update).delete(delete).fallback(method_not_allowed),
        )
        .route(
            &schema.create_route(),
            post(create_from_path).fallback(method_not_allowed),
        )
        .with_state(state)
}
