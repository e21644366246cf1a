//! Client-side state for the chat widget.
//!
//! DESIGN
//! ======
//! State is a plain struct held in an `RwSignal` and provided via context;
//! transitions are ordinary methods so they run in host tests.

pub mod chat;
