//! ブラウザ環境とのバインディング
//!
//! - テーマ設定: cookie（期限付き）
//! - 配色設定: `matchMedia("(prefers-color-scheme: dark)")`
//! - ダークマーカー: `<html>` の `dark` クラス
//! - クリップボード: `navigator.clipboard.writeText`

use mail_triage_common::{Clipboard, DisplayEnv, PreferenceStore, ThemeMode};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlDocument;

const SECONDS_PER_DAY: u64 = 86_400;

/// `document.cookie` の文字列から値を取り出す
pub fn cookie_value(cookies: &str, key: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value.to_string())
}

/// 書き込み用のcookie文字列
pub fn format_cookie(key: &str, value: &str, expires_in_days: u32) -> String {
    format!(
        "{}={}; max-age={}; path=/; SameSite=Lax",
        key,
        value,
        u64::from(expires_in_days) * SECONDS_PER_DAY
    )
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

/// cookieベースの設定ストア
#[derive(Clone, Copy, Default)]
pub struct CookieStore;

impl PreferenceStore for CookieStore {
    fn read(&self, key: &str) -> Option<String> {
        let cookies = html_document()?.cookie().ok()?;
        cookie_value(&cookies, key)
    }

    fn write(&self, key: &str, value: &str, expires_in_days: u32) {
        let Some(document) = html_document() else {
            return;
        };
        if document
            .set_cookie(&format_cookie(key, value, expires_in_days))
            .is_err()
        {
            gloo::console::warn!("cookie could not be written");
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct BrowserDisplay;

impl BrowserDisplay {
    fn toggle_marker(mode: ThemeMode) -> Option<()> {
        let root = web_sys::window()?.document()?.document_element()?;
        let classes = root.class_list();
        let applied = if mode.is_dark() {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
        applied.ok()
    }
}

impl DisplayEnv for BrowserDisplay {
    fn prefers_dark(&self) -> Option<bool> {
        let query = web_sys::window()?
            .match_media("(prefers-color-scheme: dark)")
            .ok()??;
        Some(query.matches())
    }

    fn apply_theme(&self, mode: ThemeMode) {
        if Self::toggle_marker(mode).is_none() {
            gloo::console::warn!("theme marker could not be applied");
        }
    }
}

/// 非同期のファイル読み込みの世代管理
///
/// 選択し直したときは古い読み込みの結果を捨てる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReadTracker {
    latest: u64,
    pending: bool,
}

impl FileReadTracker {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.pending = true;
        self.latest
    }

    /// 最新の読み込みなら true を返して待機を解除
    pub fn finish(&mut self, token: u64) -> bool {
        if token != self.latest {
            return false;
        }
        self.pending = false;
        true
    }

    /// 選択が解除された
    pub fn cancel(&mut self) {
        self.latest += 1;
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// 現在のビューポート幅
pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

#[derive(Clone, Copy, Default)]
pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    type Error = String;

    async fn write_text(&self, text: &str) -> Result<(), Self::Error> {
        let window = web_sys::window().ok_or("window unavailable")?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| format!("{:?}", e))
    }
}
