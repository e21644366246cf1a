//! History loader and chat exchange drivers.
//!
//! SYSTEM CONTEXT
//! ==============
//! These async drivers sequence one network interaction against
//! [`ChatState`]. They take the request future and a [`ChatStore`] instead of
//! calling `gloo-net` and Leptos signals directly, so the browser build
//! passes `net::api` futures and an `RwSignal`, while tests pass ready
//! futures and a `RefCell`.
//!
//! ERROR HANDLING
//! ==============
//! History failures are logged and leave no history in the list. Chat failures of
//! any kind are logged and shown as the configured apology bubble.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::future::Future;

use leptos::prelude::{RwSignal, Update};

use crate::net::reply_stream::{ReplyStream, pump_reply};
use crate::net::types::{ApiError, HistoryMessage};
use crate::state::chat::ChatState;

/// Somewhere `ChatState` lives and can be mutated in place.
pub trait ChatStore {
    fn apply<F: FnOnce(&mut ChatState)>(&self, f: F);
}

impl ChatStore for RwSignal<ChatState> {
    fn apply<F: FnOnce(&mut ChatState)>(&self, f: F) {
        self.update(f);
    }
}

/// Await `fetch` and replace the message list with its result.
///
/// # Errors
///
/// Returns the fetch error after logging it; no history bubbles are shown.
pub async fn load_history<S, Fut>(store: &S, fetch: Fut) -> Result<usize, ApiError>
where
    S: ChatStore,
    Fut: Future<Output = Result<Vec<HistoryMessage>, ApiError>>,
{
    match fetch.await {
        Ok(history) => {
            let count = history.len();
            store.apply(|chat| chat.load_history(history));
            Ok(count)
        }
        Err(e) => {
            log::error!("Error loading chat history: {e}");
            store.apply(|chat| chat.load_history(Vec::new()));
            Err(e)
        }
    }
}

/// Await `send`, then stream the reply into the pending assistant bubble.
///
/// The caller must already have accepted the message with
/// [`ChatState::submit`]. Returns the number of chunks read.
///
/// # Errors
///
/// Returns the request or stream error after logging it and appending the
/// `apology` bubble.
pub async fn run_exchange<S, R, Fut>(store: &S, send: Fut, apology: &str) -> Result<usize, ApiError>
where
    S: ChatStore,
    R: ReplyStream,
    Fut: Future<Output = Result<R, ApiError>>,
{
    let mut reply = match send.await {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("Error: {e}");
            store.apply(|chat| chat.fail_reply(apology));
            return Err(e);
        }
    };

    store.apply(ChatState::open_reply);

    match pump_reply(&mut reply, |text| store.apply(|chat| chat.append_chunk(text))).await {
        Ok(chunks) => {
            log::debug!("chat reply complete after {chunks} chunks");
            store.apply(ChatState::finish_reply);
            Ok(chunks)
        }
        Err(e) => {
            log::error!("Error: {e}");
            store.apply(|chat| chat.fail_reply(apology));
            Err(e)
        }
    }
}
