//! Root widget component and context providers.

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;
use crate::config::WidgetConfig;
use crate::state::chat::ChatState;

/// Root widget component.
///
/// Provides the widget config and conversation state to child components in
/// place of process-wide DOM handles.
#[component]
pub fn App(#[prop(optional)] config: Option<WidgetConfig>) -> impl IntoView {
    let config = config.unwrap_or_else(WidgetConfig::from_host_page);
    let chat = RwSignal::new(ChatState::new(config.converter()));

    provide_context(config);
    provide_context(chat);

    view! { <ChatPanel/> }
}
