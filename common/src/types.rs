//! 分類結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ClassificationResult: バックエンドが返す分類結果（表示・保持の単位）
//! - ClassificationOutcome: 1回の分類呼び出しの最終結果
//! - StagedFile: 送信前に選択されたファイル

use serde::{Deserialize, Serialize};

/// 分類結果
///
/// 一度作成されたら変更しない。リストは追加と削除のみ行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 分類対象となった本文（ファイルから抽出、または入力されたテキスト）
    pub original_content: String,

    /// バックエンドが付けたラベル（この層では解釈しない）
    pub classification: String,

    /// 返信文の提案
    pub suggested_response: String,
}

/// 分類呼び出しの結果
///
/// ネットワーク境界で一度だけ判定し、以降はこのタグで分岐する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    Success(ClassificationResult),
    /// バックエンドが意味のあるメッセージ付きで拒否した
    KnownFailure(String),
    /// 通信エラー、不正なボディ、想定外のステータスなど
    UnknownFailure,
}

impl ClassificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ClassificationOutcome::Success(_))
    }
}

/// 送信前に選択されたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_deserialize_wire_names() {
        let json = r#"{
            "original_content": "Hello there, please respond",
            "classification": "Importante",
            "suggested_response": "Obrigado, retornaremos em breve."
        }"#;

        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.original_content, "Hello there, please respond");
        assert_eq!(result.classification, "Importante");
        assert_eq!(result.suggested_response, "Obrigado, retornaremos em breve.");
    }

    #[test]
    fn test_result_missing_field_is_error() {
        let json = r#"{"original_content": "x", "classification": "y"}"#;
        assert!(serde_json::from_str::<ClassificationResult>(json).is_err());
    }

    #[test]
    fn test_outcome_is_success() {
        assert!(!ClassificationOutcome::UnknownFailure.is_success());
        assert!(!ClassificationOutcome::KnownFailure("x".into()).is_success());
    }
}
