//! HTTP route definitions

use crate::{error, handlers, middleware, AppState};
use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main router
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        // Service endpoints
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        // Tree endpoints
        .merge(handlers::children::router("/children/bst", Arc::clone(&state.bst)))
        .merge(handlers::children::router("/children/avl", Arc::clone(&state.avl)))
        // Apply middleware
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(state.config.max_body_size));

    let router = if state.config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    };

    router.with_state(state)
}
