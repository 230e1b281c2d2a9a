use crate::error::{Result, TriageError};
use mail_triage_common::ControllerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const BASE_URL_ENV: &str = "MAIL_TRIAGE_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
    /// 端末の桁数でのレイアウトしきい値
    pub terminal_threshold: u32,
    pub controller: ControllerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: 60,
            terminal_threshold: 100,
            controller: ControllerConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.controller.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TriageError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("mail-triage"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// テーマ設定の保存先
    pub fn preferences_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("preferences.json"))
    }

    pub fn get_base_url(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                return Ok(url);
            }
        }

        self.base_url.clone().ok_or(TriageError::MissingBaseUrl)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TriageError::Config(format!(
                "URLは http:// または https:// で始まる必要があります: {}",
                url
            )));
        }
        self.base_url = Some(url);
        self.save()
    }

    /// 端末向けのコントローラ設定
    pub fn terminal_controller(&self) -> ControllerConfig {
        ControllerConfig {
            layout_threshold: self.terminal_threshold,
            ..self.controller.clone()
        }
    }
}
