//! 分類結果の一覧（テーブル / カード）

use crate::app::WebSession;
use crate::platform::BrowserClipboard;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mail_triage_common::results::WAITING_MESSAGE;
use mail_triage_common::{copy_suggestion, EmptyState, Presentation, SessionHandle};

#[component]
pub fn ResultsSection(session: WebSession) -> impl IntoView {
    let on_copy = move |index: usize| {
        spawn_local(async move {
            copy_suggestion(&session, &BrowserClipboard, index).await;
        });
    };
    let on_remove = move |index: usize| {
        session.update(|s| s.remove_at(index));
    };

    let body = move || {
        session.state.with(|s| match s.empty_state() {
            Some(EmptyState::Waiting) => view! {
                <p class="text-muted empty">{WAITING_MESSAGE}</p>
            }
            .into_any(),
            Some(EmptyState::Busy) => view! { <Spinner /> }.into_any(),
            None => render_presentation(s.presentation(), on_copy, on_remove),
        })
    };
    let trailing = move || session.state.with(|s| s.show_trailing_busy());

    view! {
        <section class="results">
            <h2>"Emails classificados"</h2>
            {body}
            <Show when=trailing>
                <Spinner />
            </Show>
        </section>
    }
}

fn render_presentation<C, R>(presentation: Presentation<'_>, on_copy: C, on_remove: R) -> AnyView
where
    C: Fn(usize) + Copy + Send + Sync + 'static,
    R: Fn(usize) + Copy + Send + Sync + 'static,
{
    match presentation {
        Presentation::Table { header, rows } => {
            let rows = rows
                .into_iter()
                .map(|row| {
                    let index = row.index;
                    view! {
                        <tr>
                            <td class="cell-original">{row.original_content.to_string()}</td>
                            <td class="cell-classification">{row.classification.to_string()}</td>
                            <td class="cell-response">{row.suggested_response.to_string()}</td>
                            <td class="cell-actions">
                                <ActionButtons index=index on_copy=on_copy on_remove=on_remove />
                            </td>
                        </tr>
                    }
                })
                .collect_view();
            view! {
                <table class="results-table">
                    <thead>
                        <tr>
                            {header.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            }
            .into_any()
        }
        Presentation::Cards(cards) => cards
            .into_iter()
            .map(|card| {
                let index = card.index;
                view! {
                    <article class="result-card">
                        <h3>{card.title}</h3>
                        <p>{card.classification_line}</p>
                        <p>{card.response_line}</p>
                        <ActionButtons index=index on_copy=on_copy on_remove=on_remove />
                    </article>
                }
            })
            .collect_view()
            .into_any(),
    }
}

#[component]
fn ActionButtons<C, R>(index: usize, on_copy: C, on_remove: R) -> impl IntoView
where
    C: Fn(usize) + Copy + Send + Sync + 'static,
    R: Fn(usize) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="result-actions">
            <button class="btn btn-secondary" on:click=move |_| on_copy(index)>
                "Copiar resposta"
            </button>
            <button class="btn btn-danger" on:click=move |_| on_remove(index)>
                "Remover"
            </button>
        </div>
    }
}

#[component]
fn Spinner() -> impl IntoView {
    view! {
        <div class="spinner" role="status">
            <span class="spinner-icon"></span>
            <span>"Classificando..."</span>
        </div>
    }
}
