//! Route configuration.

use crate::auth::{api_key_middleware, trace_middleware};
use crate::handlers;
use crate::state::AppState;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Only /code sits behind the API key; the index and health probe are
    // intentionally unauthenticated.
    let gated = Router::new()
        .route("/code", get(handlers::get_code))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/v1/health", get(handlers::health_check))
        .merge(gated)
        .layer(middleware::from_fn(trace_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
