//! HTTP DTOs for the chat surface.
//!
//! These types decouple the wire API from domain types.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One conversational turn from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// An appointment booking request.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub session_id: String,
    pub preferred_day: String,
    pub preferred_time: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply envelope for a conversational turn.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub message: String,
    pub session_id: String,
    pub suggestions: Vec<String>,
}

/// Single-message response (booking confirmation, welcome payload).
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}
