//! テーマ設定（ライト/ダーク）
//!
//! 起動時に保存済みの設定を一度だけ読み、なければ環境の配色設定から決める。
//! 切り替えのたびに期限を更新して保存する。

use serde::{Deserialize, Serialize};

/// 設定ストアのキー
pub const THEME_KEY: &str = "mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 期限付きの小さなキーバリューストア（Webではcookie）
///
/// 読み書きできない環境では「設定なし」として振る舞い、エラーにはしない。
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str, expires_in_days: u32);
}

/// 表示環境
pub trait DisplayEnv {
    /// 環境の配色設定。取得できなければ None
    fn prefers_dark(&self) -> Option<bool>;

    /// 文書全体のダークマーカーを付け外しする
    fn apply_theme(&self, mode: ThemeMode);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeManager {
    mode: ThemeMode,
    expiry_days: u32,
}

impl ThemeManager {
    /// 起動時の初期化
    pub fn init(store: &impl PreferenceStore, env: &impl DisplayEnv, expiry_days: u32) -> Self {
        if let Some(mode) = store.read(THEME_KEY).as_deref().and_then(ThemeMode::parse) {
            env.apply_theme(mode);
            tracing::debug!(%mode, "stored theme preference applied");
            return Self { mode, expiry_days };
        }

        let mode = match env.prefers_dark() {
            Some(true) => ThemeMode::Dark,
            _ => ThemeMode::Light,
        };
        env.apply_theme(mode);
        store.write(THEME_KEY, mode.as_str(), expiry_days);
        tracing::debug!(%mode, "theme derived from ambient preference");

        Self { mode, expiry_days }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// 切り替えて保存（期限も更新）
    pub fn toggle(&mut self, store: &impl PreferenceStore, env: &impl DisplayEnv) -> ThemeMode {
        self.mode = self.mode.toggled();
        env.apply_theme(self.mode);
        store.write(THEME_KEY, self.mode.as_str(), self.expiry_days);
        tracing::info!(mode = %self.mode, "theme toggled");
        self.mode
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeDisplay, MemoryStore};
    use super::*;

    #[test]
    fn test_stored_preference_wins() {
        let store = MemoryStore::with(THEME_KEY, "dark");
        let env = FakeDisplay {
            prefers_dark: Some(false),
            ..Default::default()
        };

        let manager = ThemeManager::init(&store, &env, 5);
        assert_eq!(manager.mode(), ThemeMode::Dark);
        assert_eq!(env.marker.get(), Some(ThemeMode::Dark));
        // 保存済みなら書き戻さない
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn test_ambient_preference_is_persisted() {
        let store = MemoryStore::default();
        let env = FakeDisplay {
            prefers_dark: Some(true),
            ..Default::default()
        };

        let manager = ThemeManager::init(&store, &env, 5);
        assert_eq!(manager.mode(), ThemeMode::Dark);
        assert_eq!(env.marker.get(), Some(ThemeMode::Dark));
        assert_eq!(
            store.values.borrow().get(THEME_KEY).cloned(),
            Some(("dark".to_string(), 5))
        );
    }

    #[test]
    fn test_missing_capability_defaults_to_light() {
        let store = MemoryStore::default();
        let env = FakeDisplay::default();

        let manager = ThemeManager::init(&store, &env, 5);
        assert_eq!(manager.mode(), ThemeMode::Light);
        assert_eq!(store.value(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_unrecognized_stored_value_falls_back() {
        let store = MemoryStore::with(THEME_KEY, "sepia");
        let env = FakeDisplay {
            prefers_dark: Some(true),
            ..Default::default()
        };

        let manager = ThemeManager::init(&store, &env, 5);
        assert_eq!(manager.mode(), ThemeMode::Dark);
        assert_eq!(store.value(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_twice_restores_marker_and_store() {
        let store = MemoryStore::with(THEME_KEY, "light");
        let env = FakeDisplay::default();
        let mut manager = ThemeManager::init(&store, &env, 5);

        assert_eq!(manager.toggle(&store, &env), ThemeMode::Dark);
        assert_eq!(env.marker.get(), Some(ThemeMode::Dark));
        assert_eq!(store.value(THEME_KEY).as_deref(), Some("dark"));

        assert_eq!(manager.toggle(&store, &env), ThemeMode::Light);
        assert_eq!(env.marker.get(), Some(ThemeMode::Light));
        assert_eq!(store.value(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_refreshes_expiry() {
        let store = MemoryStore::with(THEME_KEY, "light");
        let env = FakeDisplay::default();
        let mut manager = ThemeManager::init(&store, &env, 7);

        manager.toggle(&store, &env);
        assert_eq!(store.values.borrow().get(THEME_KEY).map(|(_, d)| *d), Some(7));
    }
}
