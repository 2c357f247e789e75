//! Page-independent client state.
//!
//! DESIGN
//! ======
//! State is split by concern (`notice`, `progress`) so pages depend only on
//! the small models they render.

pub mod notice;
pub mod progress;
