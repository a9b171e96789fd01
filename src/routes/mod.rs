//! Router assembly.

pub mod common;
pub mod entity;

pub use common::common_routes;
pub use entity::{entity_routes, resource_routes, to_many_routes};

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Common routes plus every collection, with request tracing and the configured body limit.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.body_limit;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(&state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}
