//! REST helpers for the history and chat endpoints.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Host builds (tests): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Both helpers return `Result` so callers decide the user-visible policy:
//! the history loader only logs, the chat controller shows an apology.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "csr")]
use super::reply_stream::BrowserReply;
use super::types::{ApiError, HistoryMessage};

#[cfg(any(test, feature = "csr"))]
fn status_error(status: u16, status_text: &str) -> ApiError {
    ApiError::Status { status, status_text: status_text.to_owned() }
}

#[cfg(any(test, feature = "csr"))]
fn chat_body(message: &str) -> super::types::ChatRequest {
    super::types::ChatRequest { message: message.to_owned() }
}

/// Fetch past messages from `url`, oldest first.
///
/// # Errors
///
/// Returns an error if the request fails, the status is not a success, or
/// the body is not a JSON array of messages.
pub async fn fetch_history(url: &str) -> Result<Vec<HistoryMessage>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(status_error(resp.status(), &resp.status_text()));
        }
        let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        super::types::parse_history(&body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = url;
        Err(ApiError::Unavailable)
    }
}

/// Send `message` to the chat endpoint at `url` and return the streamed reply.
///
/// # Errors
///
/// Returns an error if the request fails or the server responds with a
/// non-success status. The reply body is not read here.
#[cfg(feature = "csr")]
pub async fn post_chat(url: &str, message: &str) -> Result<BrowserReply, ApiError> {
    let resp = gloo_net::http::Request::post(url)
        .json(&chat_body(message))
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(status_error(resp.status(), &resp.status_text()));
    }
    Ok(BrowserReply::new(resp.body()))
}
