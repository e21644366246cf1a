//! Conversation state and the chat controller's transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `ChatPanel` component owns the async sequence (history fetch, chat
//! POST, chunk reads) and calls into `ChatState` at each step. Every step
//! here is synchronous so the full submit/stream/fail lifecycle is testable
//! without a browser.
//!
//! INVARIANTS
//! ==========
//! - At most one reply is pending; `submit` refuses input while one is.
//! - The pending reply's bubble is re-rendered from the whole buffer on each
//!   chunk, never patched.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use markdown_lite::Converter;

use crate::net::types::HistoryMessage;

/// Who authored a bubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// What a bubble displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BubbleBody {
    /// Literal text, inserted as a text node.
    Text(String),
    /// Converter output, inserted as markup.
    Html(String),
}

/// One rendered conversation turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub author: Author,
    pub body: BubbleBody,
}

impl ChatMessage {
    fn new(author: Author, body: BubbleBody) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), author, body }
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

/// Response buffer for the reply currently streaming in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingReply {
    /// Id of the assistant bubble, once the reply stream has opened.
    pub bubble_id: Option<String>,
    /// Decoded text received so far.
    pub buffer: String,
}

/// State for the chat widget's message list.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub pending: Option<PendingReply>,
    pub converter: Converter,
    /// Leading entries of `messages` that came from history; live bubbles
    /// follow them.
    pub history_len: usize,
}

impl ChatState {
    pub fn new(converter: Converter) -> Self {
        Self { converter, ..Self::default() }
    }

    /// `true` while a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace previously loaded history with `history`, oldest first.
    ///
    /// Bubbles added by live submits stay after the history, so a reply
    /// that is still streaming keeps its bubble.
    pub fn load_history(&mut self, history: Vec<HistoryMessage>) {
        let loaded: Vec<ChatMessage> = history
            .into_iter()
            .map(|message| {
                if message.is_user {
                    ChatMessage::new(Author::User, BubbleBody::Text(message.content))
                } else {
                    ChatMessage::new(Author::Assistant, BubbleBody::Html(self.converter.convert(&message.content)))
                }
            })
            .collect();
        let stale = self.history_len.min(self.messages.len());
        self.history_len = loaded.len();
        self.messages.splice(..stale, loaded);
    }

    /// Submit the form's input field.
    ///
    /// Clears `input` only when a message is accepted; blank input or a
    /// pending reply leave the field untouched.
    pub fn submit_input(&mut self, input: &mut String) -> Option<String> {
        let message = self.submit(input)?;
        input.clear();
        Some(message)
    }

    /// Start a submit from raw input.
    ///
    /// Returns the trimmed text to send, or `None` when the input is blank
    /// or a reply is already pending. On `Some`, the user bubble is already
    /// in the list and the request counts as in flight.
    pub fn submit(&mut self, raw: &str) -> Option<String> {
        if self.is_busy() {
            return None;
        }
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        self.push_user(text.to_owned());
        self.pending = Some(PendingReply::default());
        Some(text.to_owned())
    }

    /// The server accepted the request; add the empty reply bubble.
    pub fn open_reply(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if pending.bubble_id.is_some() {
            return;
        }
        let bubble = ChatMessage::new(Author::Assistant, BubbleBody::Html(String::new()));
        pending.bubble_id = Some(bubble.id.clone());
        self.messages.push(bubble);
    }

    /// Append decoded text and re-render the reply bubble from the whole
    /// buffer.
    pub fn append_chunk(&mut self, text: &str) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(bubble_id) = pending.bubble_id.as_deref() else {
            return;
        };
        pending.buffer.push_str(text);
        let html = self.converter.convert(&pending.buffer);
        if let Some(bubble) = self.messages.iter_mut().find(|m| m.id == bubble_id) {
            bubble.body = BubbleBody::Html(html);
        }
    }

    /// The stream ended normally.
    pub fn finish_reply(&mut self) {
        self.pending = None;
    }

    /// The request or stream failed: drop an untouched reply bubble, then
    /// show `apology` as an assistant bubble.
    pub fn fail_reply(&mut self, apology: &str) {
        if let Some(pending) = self.pending.take() {
            if let Some(bubble_id) = pending.bubble_id {
                if pending.buffer.is_empty() {
                    self.messages.retain(|m| m.id != bubble_id);
                }
            }
        }
        self.push_assistant(apology);
    }

    fn push_user(&mut self, text: String) {
        self.messages.push(ChatMessage::new(Author::User, BubbleBody::Text(text)));
    }

    fn push_assistant(&mut self, markdown: &str) {
        let html = self.converter.convert(markdown);
        self.messages.push(ChatMessage::new(Author::Assistant, BubbleBody::Html(html)));
    }
}
