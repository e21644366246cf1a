//! Wire types for the history and chat endpoints.
//!
//! DESIGN
//! ======
//! The backend speaks plain JSON for history and request bodies; replies are
//! an untyped text stream, so there is no reply DTO here.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// One past conversation turn as returned by `GET /history`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Message text. Assistant content may already contain HTML.
    pub content: String,
    /// `true` when the user wrote the message.
    pub is_user: bool,
}

/// Body of `POST /chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Failure talking to the backend.
///
/// The chat path collapses every variant into the same apology bubble; the
/// variants exist for logging.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be sent or the connection dropped.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server responded {status} {status_text}")]
    Status { status: u16, status_text: String },
    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(String),
    /// Reading the next chunk of a streamed body failed.
    #[error("stream read failed: {0}")]
    Stream(String),
    /// HTTP is only available in the browser build.
    #[error("not available outside the browser")]
    Unavailable,
}

/// Parse a `GET /history` body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not a JSON array of messages.
pub fn parse_history(body: &str) -> Result<Vec<HistoryMessage>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
