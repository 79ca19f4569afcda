//! HTTP routes for the chat surface.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{book_appointment, post_query, welcome, ChatHandlers};

/// Creates the chat router with all endpoints.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/query", post(post_query))
        .route("/book_appointment", post(book_appointment))
        .with_state(handlers)
}
