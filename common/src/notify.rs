//! ユーザー通知（トースト）

pub const MSG_SUBMITTED: &str = "Email enviado para classificação";
pub const MSG_CLASSIFIED: &str = "Email classificado. Veja logo abaixo na lista";
pub const MSG_CLASSIFY_FAILED: &str = "Erro ao classificar email";
pub const MSG_COPIED: &str = "Texto copiado";
pub const MSG_COPY_FAILED: &str = "Não foi possível copiar o texto";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// 表示時間（ミリ秒）
    pub duration_ms: u32,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// 未表示の通知キュー
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    next_id: u64,
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, duration_ms: u32) -> u64 {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            kind,
            message: message.into(),
            duration_ms,
        };
        tracing::debug!(id = notification.id, kind = ?kind, message = %notification.message, "notification");
        self.pending.push(notification);
        self.next_id
    }

    /// 表示側が取り出す
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
