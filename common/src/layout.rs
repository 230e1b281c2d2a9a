//! レイアウト選択
//!
//! 幅をしきい値1つで2つに分ける。表示のまとめ方を変えるだけで、
//! リストの順序や中身には触れない。

use crate::results::ResultList;

/// ワイド表示のヘッダー行
pub const TABLE_HEADER: [&str; 3] = ["Email Original", "Classificação", "Resposta Sugerida"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 縦積みフォーム + カード表示
    Compact,
    /// 横並びフォーム + 3列テーブル
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSelector {
    threshold: u32,
}

impl LayoutSelector {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn select(&self, width: f64) -> Layout {
        if width < f64::from(self.threshold) {
            Layout::Compact
        } else {
            Layout::Wide
        }
    }
}

/// テーブルの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow<'a> {
    pub index: usize,
    pub original_content: &'a str,
    pub classification: &'a str,
    pub suggested_response: &'a str,
}

/// カード1枚（ラベルはインライン）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<'a> {
    pub index: usize,
    pub title: String,
    pub classification_line: String,
    pub response_line: String,
    pub suggested_response: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation<'a> {
    Table {
        header: [&'static str; 3],
        rows: Vec<TableRow<'a>>,
    },
    Cards(Vec<Card<'a>>),
}

impl<'a> Presentation<'a> {
    pub fn build(layout: Layout, results: &'a ResultList) -> Self {
        match layout {
            Layout::Wide => Presentation::Table {
                header: TABLE_HEADER,
                rows: results
                    .iter()
                    .enumerate()
                    .map(|(index, r)| TableRow {
                        index,
                        original_content: &r.original_content,
                        classification: &r.classification,
                        suggested_response: &r.suggested_response,
                    })
                    .collect(),
            },
            Layout::Compact => Presentation::Cards(
                results
                    .iter()
                    .enumerate()
                    .map(|(index, r)| Card {
                        index,
                        title: format!("Email {}", index + 1),
                        classification_line: format!("Classificação: {}", r.classification),
                        response_line: format!("Resposta sugerida: {}", r.suggested_response),
                        suggested_response: &r.suggested_response,
                    })
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Presentation::Table { rows, .. } => rows.len(),
            Presentation::Cards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
