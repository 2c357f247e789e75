//! Header shared by the signed-in pages: navigation links, the current
//! user, and logout.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;

use crate::config::Page;
use crate::net::api;
use crate::net::types::UserProfile;
use crate::session::SessionContext;
use crate::util::browser::confirm;

pub const LOGOUT_PROMPT: &str = "Are you sure you want to log out?";

/// "Name (Role)" label for the header.
#[must_use]
pub fn user_label(profile: Option<&UserProfile>) -> String {
    match profile {
        Some(p) => format!("{} ({})", p.display_name(), p.role.label()),
        None => "Signed in".to_owned(),
    }
}

#[component]
pub fn NavBar(active: Page) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let label = user_label(session.profile().as_ref());
    let links = [(Page::Dashboard, "Dashboard"), (Page::Ppr, "PPR")]
        .into_iter()
        .map(|(page, text)| {
            let class = if page == active { "nav-bar__link nav-bar__link--active" } else { "nav-bar__link" };
            view! { <a class=class href=session.config().page_href(page)>{text}</a> }
        })
        .collect::<Vec<_>>();

    let on_logout = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        if confirm(LOGOUT_PROMPT) {
            api::logout(&session);
        }
    };

    view! {
        <header class="nav-bar">
            <span class="nav-bar__brand">"PPR Monitor"</span>
            <nav class="nav-bar__links">{links}</nav>
            <span class="nav-bar__spacer"></span>
            <span class="nav-bar__user">{label}</span>
            <button class="btn nav-bar__logout" on:click=on_logout title="Logout">
                "Logout"
            </button>
        </header>
    }
}
