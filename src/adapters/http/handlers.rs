//! HTTP handlers for the chat surface.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    BookAppointmentHandler, BookingError, ConversationController, SESSION_NOT_FOUND_REPLY,
};
use crate::domain::foundation::SessionId;

use super::dto::{
    BookAppointmentRequest, ErrorResponse, MessageResponse, QueryRequest, QueryResponse,
};

/// Static welcome payload for the root route.
const ROOT_WELCOME: &str = "Welcome to Omni Suite AI's Chatbot!";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatHandlers {
    conversation: Arc<ConversationController>,
    booking: Arc<BookAppointmentHandler>,
}

impl ChatHandlers {
    pub fn new(
        conversation: Arc<ConversationController>,
        booking: Arc<BookAppointmentHandler>,
    ) -> Self {
        Self {
            conversation,
            booking,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Static welcome payload
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::new(ROOT_WELCOME))
}

/// POST /query - Handle one conversational turn
pub async fn post_query(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<QueryRequest>,
) -> Response {
    let session_id = match req.session_id {
        None => None,
        Some(raw) => match raw.parse::<SessionId>() {
            Ok(id) => Some(id),
            // An unparseable identifier is just an unknown session: same
            // soft reply, echoing the identifier the caller sent.
            Err(_) => {
                let response = QueryResponse {
                    message: SESSION_NOT_FOUND_REPLY.to_string(),
                    session_id: raw,
                    suggestions: Vec::new(),
                };
                return (StatusCode::OK, Json(response)).into_response();
            }
        },
    };

    let outcome = handlers.conversation.handle(&req.query, session_id).await;

    let response = QueryResponse {
        message: outcome.reply,
        session_id: outcome.session_id,
        suggestions: outcome.suggestions,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /book_appointment - Book an appointment against a session
pub async fn book_appointment(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<BookAppointmentRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        // An unparseable identifier can't name any session.
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(
                    "Session not found. Please start a new conversation.",
                )),
            )
                .into_response();
        }
    };

    let result = handlers
        .booking
        .handle(
            session_id,
            &req.preferred_day,
            &req.preferred_time,
            &req.full_name,
            &req.email,
            &req.phone,
        )
        .await;

    match result {
        Ok(confirmation) => {
            (StatusCode::OK, Json(MessageResponse::new(confirmation))).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_booking_error(error: BookingError) -> Response {
    match error {
        BookingError::Invalid(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        BookingError::SessionNotFound(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Session not found. Please start a new conversation.",
            )),
        )
            .into_response(),
    }
}
