//! 端末への描画
//!
//! ワイド表示は「原文 | 分類 | 返信案」の表、コンパクト表示はカード形式。

use mail_triage_common::layout::{Card, TableRow};
use mail_triage_common::results::WAITING_MESSAGE;
use mail_triage_common::{EmptyState, Notification, NotificationKind, Presentation, Session};

const BUSY_MESSAGE: &str = "⏳ Classificando...";
const ORIGINAL_PREVIEW_CHARS: usize = 60;

pub fn format_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("✔ {}", notification.message),
        NotificationKind::Error => format!("✖ {}", notification.message),
    }
}

/// 長い原文は先頭だけ表示
fn preview(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let head: String = single_line.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}

fn render_row(row: &TableRow<'_>) -> String {
    format!(
        "[{}] {} | {} | {}",
        row.index,
        preview(row.original_content, ORIGINAL_PREVIEW_CHARS),
        row.classification,
        row.suggested_response
    )
}

fn render_card(card: &Card<'_>) -> String {
    format!(
        "[{}] {}\n    {}\n    {}",
        card.index, card.title, card.classification_line, card.response_line
    )
}

pub fn render_results(session: &Session) -> String {
    match session.empty_state() {
        Some(EmptyState::Waiting) => return WAITING_MESSAGE.to_string(),
        Some(EmptyState::Busy) => return BUSY_MESSAGE.to_string(),
        None => {}
    }

    let mut lines = Vec::new();
    match session.presentation() {
        Presentation::Table { header, rows } => {
            lines.push(header.join(" | "));
            lines.push("-".repeat(40));
            lines.extend(rows.iter().map(render_row));
        }
        Presentation::Cards(cards) => {
            lines.extend(cards.iter().map(render_card));
        }
    }

    if session.show_trailing_busy() {
        lines.push(BUSY_MESSAGE.to_string());
    }
    lines.join("\n")
}
