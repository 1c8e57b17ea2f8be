//! Router composition: collection routes plus common routes, 405 fallback, CORS, body limit, tracing.

use crate::proxy::ProxyState;
use crate::routes::{
    common_routes, cors, method_not_allowed, proxy_routes, reject_oversized, resource_routes,
};
use crate::state::AppState;
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full router for an in-memory store server.
pub fn store_app(state: AppState, body_limit: usize) -> Router {
    finish(resource_routes(state), body_limit)
}

/// Full router for the pass-through server.
pub fn proxy_app(state: ProxyState, body_limit: usize) -> Router {
    finish(proxy_routes(state), body_limit)
}

fn finish(routes: Router, body_limit: usize) -> Router {
    routes
        .merge(common_routes())
        .fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(cors))
                .layer(middleware::from_fn(reject_oversized))
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}
