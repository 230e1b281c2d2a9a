//! ヘッダーコンポーネント

use crate::app::WebSession;
use crate::platform::{BrowserDisplay, CookieStore};
use leptos::prelude::*;
use mail_triage_common::SessionHandle;

#[component]
pub fn Header(session: WebSession) -> impl IntoView {
    let is_dark = move || session.state.with(|s| s.theme().is_dark());

    let on_toggle = move |_| {
        session.update(|s| s.toggle_theme(&CookieStore, &BrowserDisplay));
    };

    view! {
        <header class="header">
            <h1>"Classificador de Emails"</h1>
            <button
                class="btn btn-icon theme-toggle"
                title="Trocar de tema"
                on:click=on_toggle
            >
                {move || if is_dark() { "☀️" } else { "🌙" }}
            </button>
        </header>
    }
}
