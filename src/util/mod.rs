//! Utility helpers shared across pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (dialogs, timers, query strings)
//! and the page guard hook from page markup so the decisions stay testable.

pub mod auth;
pub mod browser;
