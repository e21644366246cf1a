//! Networking modules for the history and chat endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the HTTP requests, `reply_stream` reads the chunked chat
//! reply, and `types` defines the JSON wire schema.

pub mod api;
pub mod reply_stream;
pub mod types;
