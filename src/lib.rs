//! # chat-widget
//!
//! Leptos + WASM chat widget. Loads prior conversation history, submits user
//! messages to a chat endpoint, and renders the streamed reply through the
//! `markdown-lite` converter as it arrives.
//!
//! Build with the `csr` feature for the browser; host builds compile the same
//! state and controller logic without network access so it can be tested
//! natively.

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod net;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the widget on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    use crate::app::App;

    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        log::warn!("console logger not installed: {e}");
    }
    leptos::mount::mount_to_body(|| view! { <App/> });
}
