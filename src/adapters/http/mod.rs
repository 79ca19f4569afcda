//! HTTP transport adapter: routes, handlers, and DTOs around the core.

pub mod dto;
mod handlers;
mod routes;

use std::time::Duration;

use axum::Router;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub use handlers::ChatHandlers;
pub use routes::chat_routes;

/// Assembles the application router with its middleware stack.
///
/// CORS is wide open: the chat widget is embedded on arbitrary pages.
pub fn build_router(handlers: ChatHandlers, request_timeout: Duration) -> Router {
    chat_routes(handlers)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
}
