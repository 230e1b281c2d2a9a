//! メインアプリケーションコンポーネント

use crate::components::{
    header::Header,
    intro::Intro,
    results::ResultsSection,
    submit_forms::SubmitForms,
    toaster::Toaster,
};
use crate::platform::{viewport_width, BrowserDisplay, CookieStore};
use gloo::timers::callback::Timeout;
use leptos::ev;
use leptos::prelude::*;
use mail_triage_common::{ControllerConfig, Notification, Session, SessionHandle};

/// 画面全体で共有するセッション
///
/// 状態の変更はすべて `update` を通し、発生した通知はその場でトーストへ移す。
#[derive(Clone, Copy)]
pub struct WebSession {
    pub state: RwSignal<Session>,
    pub toasts: RwSignal<Vec<Notification>>,
}

impl WebSession {
    pub fn new(session: Session) -> Self {
        Self {
            state: RwSignal::new(session),
            toasts: RwSignal::new(Vec::new()),
        }
    }

    fn show(&self, fresh: Vec<Notification>) {
        let toasts = self.toasts;
        for notification in fresh {
            let id = notification.id;
            let duration = notification.duration_ms;
            toasts.update(|list| list.push(notification));
            Timeout::new(duration, move || {
                toasts.try_update(|list| list.retain(|n| n.id != id));
            })
            .forget();
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|n| n.id != id));
    }
}

impl SessionHandle for WebSession {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let (out, fresh) = self.state.try_update(|session| {
            let out = f(session);
            (out, session.drain_notifications())
        })?;
        self.show(fresh);
        Some(out)
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let mut initial = Session::init(ControllerConfig::default(), &CookieStore, &BrowserDisplay);
    initial.set_viewport_width(viewport_width());
    let session = WebSession::new(initial);

    // ウィンドウ幅の変化でレイアウトを再評価
    let _ = window_event_listener(ev::resize, move |_| {
        session.update(|s| s.set_viewport_width(viewport_width()));
    });

    view! {
        <div class="container">
            <Header session=session />
            <Intro />
            <SubmitForms session=session />
            <ResultsSection session=session />
            <Toaster session=session />
        </div>
    }
}
