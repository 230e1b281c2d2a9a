//! コントローラ設定
//!
//! しきい値や通知の表示時間などの定数をまとめる。
//! CLIでは設定ファイルに埋め込まれ、Webではビルド時の既定値を使う。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 送信成功後に入力を残すかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRetention {
    /// 送信後も入力を保持する（再送信可能）
    #[default]
    Keep,
    /// 送信した入力が変更されていなければ成功時にクリアする
    ClearOnSuccess,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// テキスト送信に必要な最小文字数
    pub min_text_len: usize,
    /// これ未満の幅ならコンパクト表示
    pub layout_threshold: u32,
    /// テーマ設定の保存期限（日）
    pub theme_expiry_days: u32,
    pub classified_toast_ms: u32,
    pub success_toast_ms: u32,
    pub error_toast_ms: u32,
    pub input_retention: InputRetention,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_text_len: 10,
            layout_threshold: 864,
            theme_expiry_days: 5,
            classified_toast_ms: 5000,
            success_toast_ms: 2000,
            error_toast_ms: 4000,
            input_retention: InputRetention::Keep,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_text_len == 0 {
            return Err(Error::Config("min_text_len must be at least 1".into()));
        }
        if self.layout_threshold == 0 {
            return Err(Error::Config("layout_threshold must be positive".into()));
        }
        if self.theme_expiry_days == 0 {
            return Err(Error::Config("theme_expiry_days must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.min_text_len, 10);
        assert_eq!(config.layout_threshold, 864);
        assert_eq!(config.theme_expiry_days, 5);
        assert_eq!(config.classified_toast_ms, 5000);
        assert_eq!(config.input_retention, InputRetention::Keep);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{"input_retention": "clear_on_success"}"#).unwrap();
        assert_eq!(config.input_retention, InputRetention::ClearOnSuccess);
        assert_eq!(config.min_text_len, 10);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = ControllerConfig {
            min_text_len: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
