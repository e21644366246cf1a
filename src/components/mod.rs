//! UI components for the chat widget.
//!
//! ARCHITECTURE
//! ============
//! `chat_panel` owns the form and message list; `message_bubble` renders a
//! single turn.

pub mod chat_panel;
pub mod message_bubble;
