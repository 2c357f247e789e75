//! Login page: the application's entry page and the only unguarded route.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::components::notice_banner::{NoticeBanner, notify};
use crate::config::Page;
use crate::net::api::{self, LoginError};
use crate::session::SessionContext;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::auth::redirect_signed_in_visitor;
use crate::util::browser::run_after;

/// Pause between the success notice and leaving for the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Notice text for a failed login.
#[must_use]
pub fn login_error_message(err: &LoginError) -> String {
    match err {
        LoginError::MissingFields => err.to_string(),
        LoginError::InvalidCredentials(detail) => detail.clone(),
        LoginError::Transport(_) => "Could not connect to the server.".to_owned(),
        LoginError::Status { .. } | LoginError::Decode(_) => "Login failed. Please try again.".to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    redirect_signed_in_visitor(&session);

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        if let Err(err) = api::validate_login_input(&username.get(), &password.get()) {
            notify(notices, NoticeKind::Error, login_error_message(&err));
            return;
        }
        busy.set(true);

        let session = session.clone();
        let (user, pass) = (username.get(), password.get());
        leptos::task::spawn_local(async move {
            match api::login(&session, &user, &pass).await {
                Ok(_) => {
                    notify(notices, NoticeKind::Success, LOGIN_SUCCESS_MESSAGE);
                    run_after(REDIRECT_DELAY, move || session.navigate_to(Page::Dashboard));
                }
                Err(err) => {
                    notify(notices, NoticeKind::Error, login_error_message(&err));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <NoticeBanner/>
        <div class="login-page">
            <div class="login-card">
                <h1>"PPR Monitor"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
