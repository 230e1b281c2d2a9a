//! トースト表示

use crate::app::WebSession;
use leptos::prelude::*;

#[component]
pub fn Toaster(session: WebSession) -> impl IntoView {
    view! {
        <div class="toaster">
            <For
                each=move || session.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = if toast.is_error() { "toast toast-error" } else { "toast toast-success" };
                    view! {
                        <div class=class role="status" on:click=move |_| session.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
