//! Chat panel: message list, input form, history load and submit handling.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the `chat-form`, `user-input` and `chat-messages` elements (ids
//! from `WidgetConfig`). On mount it loads history once; on submit it hands
//! the trimmed message to `controller::run_exchange`, which streams the reply
//! into `ChatState`.
//!
//! The input and send button stay disabled while a reply is pending, so at
//! most one response buffer exists at a time.

use leptos::prelude::*;

use crate::components::message_bubble::MessageBubble;
use crate::config::WidgetConfig;
use crate::state::chat::ChatState;

/// Conversation view plus the message form.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let config = expect_context::<WidgetConfig>();
    let chat = expect_context::<RwSignal<ChatState>>();

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "csr")]
    {
        let history_url = config.history_url.clone();
        leptos::task::spawn_local(async move {
            let fetch = crate::net::api::fetch_history(&history_url);
            if let Ok(count) = crate::controller::load_history(&chat, fetch).await {
                log::debug!("loaded {count} history messages");
            }
        });
    }

    Effect::new(move || {
        chat.track();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let busy = move || chat.with(ChatState::is_busy);

    #[cfg(feature = "csr")]
    let (chat_url, apology) = (StoredValue::new(config.chat_url.clone()), StoredValue::new(config.apology.clone()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut field = input.get_untracked();
        let Some(message) = chat.try_update(|c| c.submit_input(&mut field)).flatten() else {
            return;
        };
        input.set(field);

        #[cfg(feature = "csr")]
        {
            let url = chat_url.get_value();
            let apology = apology.get_value();
            leptos::task::spawn_local(async move {
                let send = crate::net::api::post_chat(&url, &message);
                if let Err(e) = crate::controller::run_exchange(&chat, send, &apology).await {
                    log::debug!("chat exchange ended with error: {e}");
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            drop(message);
        }
    };

    let can_send = move || !input.get().trim().is_empty() && !busy();

    view! {
        <div class="chat-panel">
            <div id=config.messages_id.clone() class="chat-panel__messages" node_ref=messages_ref>
                {move || {
                    chat.get()
                        .messages
                        .into_iter()
                        .map(|message| view! { <MessageBubble message=message/> })
                        .collect::<Vec<_>>()
                }}
            </div>

            <form id=config.form_id.clone() class="chat-panel__form" on:submit=on_submit>
                <input
                    id=config.input_id.clone()
                    class="chat-panel__input"
                    type="text"
                    placeholder="Type your message..."
                    autocomplete="off"
                    disabled=busy
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button class="btn btn--primary chat-panel__send" type="submit" disabled=move || !can_send()>
                    "Send"
                </button>
            </form>
        </div>
    }
}
