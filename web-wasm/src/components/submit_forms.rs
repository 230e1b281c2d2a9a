//! 送信フォーム（ファイル / テキスト）

use crate::api::backend::FetchClassifier;
use crate::app::WebSession;
use crate::platform::FileReadTracker;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mail_triage_common::{submit_file, submit_text, Layout, SessionHandle, StagedFile};
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

#[component]
pub fn SubmitForms(session: WebSession) -> impl IntoView {
    let is_wide = move || session.state.with(|s| s.layout() == Layout::Wide);
    let min_len = move || session.state.with(|s| s.config().min_text_len);
    let can_submit_text = move || session.state.with(|s| s.can_submit_text());
    let reads = RwSignal::new(FileReadTracker::default());
    let is_reading = move || reads.with(|r| r.is_pending());
    let staged_name = move || {
        session
            .state
            .with(|s| s.staged_file().map(|f| f.name.clone()))
    };

    // 読み込み完了までは前のファイルを送らない
    let on_file_change = move |ev: ev::Event| {
        session.update(|s| s.stage_file(None));
        let input: HtmlInputElement = event_target(&ev);
        match input.files().and_then(|files| files.get(0)) {
            Some(file) => {
                let Some(token) = reads.try_update(|r| r.begin()) else {
                    return;
                };
                read_file(file, move |staged| {
                    let latest = reads.try_update(|r| r.finish(token)).unwrap_or(false);
                    if let (true, Some(staged)) = (latest, staged) {
                        session.update(|s| s.stage_file(Some(staged)));
                    }
                });
            }
            None => reads.update(|r| r.cancel()),
        }
    };

    let on_submit_file = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            submit_file(&session, &FetchClassifier::from_build_env()).await;
        });
    };

    let on_text_input = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        session.update(|s| s.set_text(text));
    };

    let on_submit_text = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            submit_text(&session, &FetchClassifier::from_build_env()).await;
        });
    };

    view! {
        <section class=move || if is_wide() { "forms forms-wide" } else { "forms forms-stacked" }>
            <form class="form-card" on:submit=on_submit_file>
                <h2>"Enviar arquivo"</h2>
                <input type="file" accept=".txt,.pdf" on:change=on_file_change />
                <p class="text-muted">
                    {move || {
                        if is_reading() {
                            "Carregando arquivo...".to_string()
                        } else {
                            staged_name().unwrap_or_else(|| "Formatos aceitos: .txt e .pdf".to_string())
                        }
                    }}
                </p>
                <button type="submit" class="btn btn-primary" disabled=is_reading>
                    "Classificar arquivo"
                </button>
            </form>

            <form class="form-card" on:submit=on_submit_text>
                <h2>"Colar texto"</h2>
                <textarea
                    rows="8"
                    placeholder="Cole aqui o conteúdo do email"
                    required=true
                    minlength=move || min_len().to_string()
                    prop:value=move || session.state.with(|s| s.text().to_string())
                    on:input=on_text_input
                ></textarea>
                <button type="submit" class="btn btn-primary" disabled=move || !can_submit_text()>
                    "Classificar texto"
                </button>
            </form>
        </section>
    }
}

/// ファイルをバイト列として読み込む。失敗時は None で呼ぶ
fn read_file<F>(file: File, on_done: F)
where
    F: Fn(Option<StagedFile>) + 'static,
{
    let file_name = file.name();
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            gloo::console::error!(format!("FileReader unavailable: {:?}", e));
            on_done(None);
            return;
        }
    };

    let on_done = std::rc::Rc::new(on_done);
    let on_loaded = on_done.clone();
    let reader_clone = reader.clone();
    let load = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let staged = reader_clone
            .result()
            .ok()
            .map(|result| StagedFile::new(file_name.clone(), js_sys::Uint8Array::new(&result).to_vec()));
        on_loaded(staged);
    }) as Box<dyn FnMut(_)>);

    let on_failed = on_done.clone();
    let error = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        gloo::console::error!("file read failed");
        on_failed(None);
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(load.as_ref().unchecked_ref()));
    reader.set_onerror(Some(error.as_ref().unchecked_ref()));
    load.forget();
    error.forget();

    if let Err(e) = reader.read_as_array_buffer(&file) {
        gloo::console::error!(format!("file read failed: {:?}", e));
        on_done(None);
    }
}
