//! Networking modules for the PPR REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam, `types` defines the wire schema, and `api`
//! holds the typed calls pages make (login plus PPR, meta, and avance CRUD).

pub mod api;
pub mod transport;
pub mod types;
