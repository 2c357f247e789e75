//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::AppConfig;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, ppr::PprPage, ppr_progress::PprProgressPage};
use crate::session::SessionContext;
use crate::state::notice::NoticeState;

/// Load configuration, falling back to defaults on a bad value.
fn load_config() -> AppConfig {
    AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("invalid configuration, using defaults: {e}");
        AppConfig::default()
    })
}

/// Root application component.
///
/// Provides the session context and notice state, then sets up routing.
/// Each page runs its own guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionContext::browser(load_config());
    log::debug!("session context ready: {session:?}");
    provide_context(session);
    provide_context(RwSignal::new(NoticeState::default()));

    view! {
        <Stylesheet id="ppr-monitor" href="/pkg/ppr-monitor.css"/>
        <Title text="PPR Monitor"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("index.html") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("ppr") view=PprPage/>
                <Route path=StaticSegment("ppr-progress") view=PprProgressPage/>
            </Routes>
        </Router>
    }
}
