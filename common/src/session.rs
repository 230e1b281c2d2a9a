//! セッション状態
//!
//! テーマ、送信待ちの入力、送信中チケット、結果リスト、通知を1つにまとめる。
//! 表示側は読み取り専用のアクセサで参照し、変更はコマンドメソッド経由で行う。
//! 非同期の流れは `orchestrator` が担当する。

use std::collections::BTreeMap;

use crate::api::ClassifyRequest;
use crate::config::{ControllerConfig, InputRetention};
use crate::layout::{Layout, LayoutSelector, Presentation};
use crate::notify::{
    Notification, NotificationKind, NotificationQueue, MSG_CLASSIFIED, MSG_CLASSIFY_FAILED,
    MSG_COPIED, MSG_COPY_FAILED, MSG_SUBMITTED,
};
use crate::results::{EmptyState, ResultList};
use crate::theme::{DisplayEnv, PreferenceStore, ThemeManager, ThemeMode};
use crate::types::{ClassificationOutcome, ClassificationResult, StagedFile};
use crate::validator::{validate_file_name, validate_text, ValidationError};

/// 送信1件を識別する
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// 検証を通過した送信
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub request: ClassifyRequest,
}

/// 成功時の入力クリア判定用に、送った内容を覚えておく
#[derive(Debug, Clone)]
enum SubmittedInput {
    File(StagedFile),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Session {
    config: ControllerConfig,
    theme: ThemeManager,
    layout: LayoutSelector,
    viewport_width: f64,
    pending_file: Option<StagedFile>,
    pending_text: String,
    results: ResultList,
    next_ticket: u64,
    outstanding: BTreeMap<Ticket, SubmittedInput>,
    notifications: NotificationQueue,
}

impl Session {
    /// テーマを初期化してセッションを作る
    pub fn init(
        config: ControllerConfig,
        store: &impl PreferenceStore,
        env: &impl DisplayEnv,
    ) -> Self {
        let theme = ThemeManager::init(store, env, config.theme_expiry_days);
        Self::with_theme(config, theme)
    }

    pub fn with_theme(config: ControllerConfig, theme: ThemeManager) -> Self {
        let layout = LayoutSelector::new(config.layout_threshold);
        Self {
            config,
            theme,
            layout,
            viewport_width: 0.0,
            pending_file: None,
            pending_text: String::new(),
            results: ResultList::new(),
            next_ticket: 0,
            outstanding: BTreeMap::new(),
            notifications: NotificationQueue::default(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ----- テーマ -----

    pub fn theme(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn toggle_theme(&mut self, store: &impl PreferenceStore, env: &impl DisplayEnv) -> ThemeMode {
        self.theme.toggle(store, env)
    }

    // ----- レイアウト -----

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn layout(&self) -> Layout {
        self.layout.select(self.viewport_width)
    }

    pub fn presentation(&self) -> Presentation<'_> {
        Presentation::build(self.layout(), &self.results)
    }

    // ----- 入力 -----

    pub fn stage_file(&mut self, file: Option<StagedFile>) {
        self.pending_file = file;
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.pending_file.as_ref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.pending_text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.pending_text
    }

    /// テキスト送信ボタンを押せるか
    pub fn can_submit_text(&self) -> bool {
        validate_text(&self.pending_text, self.config.min_text_len).is_ok()
    }

    // ----- 送信 -----

    /// ファイル送信を開始。未選択なら通知なしで None
    pub fn begin_file_submission(&mut self) -> Option<Submission> {
        let checked = validate_file_name(self.pending_file.as_ref().map(|f| f.name.as_str()));
        if let Err(e) = checked {
            self.reject(e);
            return None;
        }

        let file = self.pending_file.clone()?;
        let submitted = SubmittedInput::File(file.clone());
        Some(self.issue(ClassifyRequest::File(file), submitted))
    }

    /// テキスト送信を開始
    pub fn begin_text_submission(&mut self) -> Option<Submission> {
        if let Err(e) = validate_text(&self.pending_text, self.config.min_text_len) {
            self.reject(e);
            return None;
        }

        let text = self.pending_text.clone();
        let submitted = SubmittedInput::Text(text.clone());
        Some(self.issue(ClassifyRequest::Text(text), submitted))
    }

    fn reject(&mut self, error: ValidationError) {
        if error.is_silent() {
            tracing::debug!(%error, "submission skipped");
            return;
        }
        tracing::info!(%error, "submission rejected");
        self.notifications
            .push(NotificationKind::Error, error.to_string(), self.config.error_toast_ms);
    }

    fn issue(&mut self, request: ClassifyRequest, submitted: SubmittedInput) -> Submission {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.outstanding.insert(ticket, submitted);
        self.notifications
            .push(NotificationKind::Success, MSG_SUBMITTED, self.config.success_toast_ms);
        tracing::info!(ticket = ticket.0, path = request.path(), in_flight = self.outstanding.len(), "submission issued");

        Submission { ticket, request }
    }

    /// 送信完了を反映。同じチケットの2回目以降は無視する
    pub fn finish_submission(&mut self, ticket: Ticket, outcome: ClassificationOutcome) {
        let Some(submitted) = self.outstanding.remove(&ticket) else {
            tracing::warn!(ticket = ticket.0, "submission already settled");
            return;
        };

        match outcome {
            ClassificationOutcome::Success(result) => {
                self.results.append(result);
                self.notifications.push(
                    NotificationKind::Success,
                    MSG_CLASSIFIED,
                    self.config.classified_toast_ms,
                );
                if self.config.input_retention == InputRetention::ClearOnSuccess {
                    self.clear_submitted(submitted);
                }
                tracing::info!(ticket = ticket.0, results = self.results.len(), "submission classified");
            }
            ClassificationOutcome::KnownFailure(message) => {
                tracing::info!(ticket = ticket.0, %message, "submission rejected by backend");
                self.notifications
                    .push(NotificationKind::Error, message, self.config.error_toast_ms);
            }
            ClassificationOutcome::UnknownFailure => {
                tracing::warn!(ticket = ticket.0, "submission failed");
                self.notifications.push(
                    NotificationKind::Error,
                    MSG_CLASSIFY_FAILED,
                    self.config.error_toast_ms,
                );
            }
        }
    }

    /// 結果を待たずに破棄された送信。通知はしない
    pub fn abandon_submission(&mut self, ticket: Ticket) {
        if self.outstanding.remove(&ticket).is_some() {
            tracing::debug!(ticket = ticket.0, "submission abandoned");
        }
    }

    // 送信後に書き換えられた入力は残す
    fn clear_submitted(&mut self, submitted: SubmittedInput) {
        match submitted {
            SubmittedInput::File(file) => {
                if self.pending_file.as_ref() == Some(&file) {
                    self.pending_file = None;
                }
            }
            SubmittedInput::Text(text) => {
                if self.pending_text == text {
                    self.pending_text.clear();
                }
            }
        }
    }

    /// 1件以上送信中か
    pub fn is_busy(&self) -> bool {
        !self.outstanding.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    // ----- 結果リスト -----

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn remove_at(&mut self, index: usize) -> Option<ClassificationResult> {
        let removed = self.results.remove_at(index);
        match &removed {
            Some(_) => tracing::info!(index, remaining = self.results.len(), "result removed"),
            None => tracing::debug!(index, "remove ignored: index out of range"),
        }
        removed
    }

    pub fn suggestion(&self, index: usize) -> Option<&str> {
        self.results.get(index).map(|r| r.suggested_response.as_str())
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.results.empty_state(self.is_busy())
    }

    /// リストの下に出すローディング表示
    pub fn show_trailing_busy(&self) -> bool {
        !self.results.is_empty() && self.is_busy()
    }

    // ----- クリップボード -----

    pub fn record_copy(&mut self, succeeded: bool) {
        if succeeded {
            self.notifications
                .push(NotificationKind::Success, MSG_COPIED, self.config.success_toast_ms);
        } else {
            self.notifications
                .push(NotificationKind::Error, MSG_COPY_FAILED, self.config.error_toast_ms);
        }
    }

    // ----- 通知 -----

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.pending()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
