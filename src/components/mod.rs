//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (notice banner, nav bar, charts) and read
//! the session and notice state from Leptos context providers.

pub mod nav_bar;
pub mod notice_banner;
pub mod series_chart;
