//! A single conversation bubble.

use leptos::prelude::*;

use crate::state::chat::{BubbleBody, ChatMessage};

/// Outer row classes: user bubbles sit at the end of the row.
pub fn row_class(is_user: bool) -> &'static str {
    if is_user { "chat chat-end" } else { "chat chat-start" }
}

pub fn bubble_class(is_user: bool) -> &'static str {
    if is_user { "chat-bubble chat-bubble-primary" } else { "chat-bubble chat-bubble-secondary" }
}

/// Render one message. Text bodies become text nodes; HTML bodies are set as
/// inner markup.
#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let is_user = message.is_user();

    let body = match message.body {
        BubbleBody::Text(text) => view! { <div class=bubble_class(is_user)>{text}</div> }.into_any(),
        BubbleBody::Html(html) => view! { <div class=bubble_class(is_user) inner_html=html></div> }.into_any(),
    };

    view! { <div class=row_class(is_user)>{body}</div> }
}
