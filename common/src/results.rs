//! 分類結果リスト
//!
//! 到着順に並ぶ。要素は追加・削除のみで、内容の書き換えはしない。

use crate::types::ClassificationResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultList {
    entries: Vec<ClassificationResult>,
}

/// リストが空のときの表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// 「Nenhum email classificado ainda」
    Waiting,
    /// 送信中のためローディング表示
    Busy,
}

pub const WAITING_MESSAGE: &str = "Nenhum email classificado ainda";

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾に追加（重複排除なし）
    pub fn append(&mut self, result: ClassificationResult) {
        self.entries.push(result);
    }

    /// 現在の位置で1件削除。範囲外なら何もしない
    pub fn remove_at(&mut self, index: usize) -> Option<ClassificationResult> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&ClassificationResult> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassificationResult> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ClassificationResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 空のときだけ表示状態を返す
    pub fn empty_state(&self, busy: bool) -> Option<EmptyState> {
        match (self.is_empty(), busy) {
            (false, _) => None,
            (true, true) => Some(EmptyState::Busy),
            (true, false) => Some(EmptyState::Waiting),
        }
    }
}

impl<'a> IntoIterator for &'a ResultList {
    type Item = &'a ClassificationResult;
    type IntoIter = std::slice::Iter<'a, ClassificationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
