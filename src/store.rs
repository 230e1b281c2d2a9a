//! ファイルベースの設定ストア
//!
//! キーごとに値と有効期限（UNIX秒）を保持する。期限切れの値は「なし」として扱う。

use crate::error::{Result, TriageError};
use mail_triage_common::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredValue {
    pub value: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, StoredValue>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &BTreeMap<String, StoredValue>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    /// 指定時刻で有効な値を読む
    pub fn read_at(&self, key: &str, now: i64) -> Result<Option<String>> {
        let entries = self.load()?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    /// 指定時刻を起点に期限を設定して書き込む
    pub fn write_at(&self, key: &str, value: &str, expires_in_days: u32, now: i64) -> Result<()> {
        // 壊れたファイルは作り直す
        let mut entries = self.load().unwrap_or_default();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: now + i64::from(expires_in_days) * SECONDS_PER_DAY,
            },
        );
        self.save(&entries)
            .map_err(|e| TriageError::Store(format!("{}: {}", self.path.display(), e)))
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Option<String> {
        match self.read_at(key, now()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "preference store unreadable");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str, expires_in_days: u32) {
        if let Err(e) = self.write_at(key, value, expires_in_days, now()) {
            tracing::warn!(error = %e, "preference not saved");
        }
    }
}
