//! Utility helpers shared across widget modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules hold logic that needs no browser so it can be tested on
//! the host.

pub mod utf8;
