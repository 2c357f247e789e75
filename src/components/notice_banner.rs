//! Top-of-page notice banner and the helpers pages use to raise notices.

use leptos::prelude::*;

use crate::net::api::{ApiError, error_message};
use crate::state::notice::{NOTICE_TTL, NoticeKind, NoticeState};
use crate::util::browser::run_after;

/// Show a notice and schedule its auto-dismiss.
pub fn notify(notices: RwSignal<NoticeState>, kind: NoticeKind, message: impl Into<String>) {
    let message = message.into();
    let Some(seq) = notices.try_update(|n| n.show(message, kind)) else {
        return;
    };
    run_after(NOTICE_TTL, move || {
        notices.try_update(|n| n.dismiss(seq));
    });
}

/// Report an API failure unless the session was lost (the page is already
/// leaving).
pub fn notify_api_error(notices: RwSignal<NoticeState>, err: &ApiError) {
    if err.is_session_loss() {
        return;
    }
    log::warn!("api call failed: {err}");
    notify(notices, NoticeKind::Error, error_message(err));
}

/// Renders the current notice, if any, with a close button.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        {move || {
            notices
                .get()
                .current
                .map(|notice| {
                    view! {
                        <div class=notice.kind.css_class() role="alert">
                            <span class="notice__message">{notice.message}</span>
                            <button
                                class="notice__close"
                                type="button"
                                title="Close"
                                on:click=move |_| notices.update(NoticeState::close)
                            >
                                "×"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
