//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page runs the page guard before anything else, owns its
//! route-scoped loading and form state, and delegates shared chrome to
//! `components`.

pub mod dashboard;
pub mod login;
pub mod ppr;
pub mod ppr_progress;
