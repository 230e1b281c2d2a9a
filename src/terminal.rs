//! 端末の表示環境
//!
//! 配色設定は `COLORFGBG`（"前景;背景"）の背景色番号から推定する。
//! テーマはダイアログの見た目に反映する。

use dialoguer::console::Term;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use mail_triage_common::{DisplayEnv, ThemeMode};
use std::cell::Cell;

#[derive(Debug, Default)]
pub struct TerminalDisplay {
    colorfgbg: Option<String>,
    mode: Cell<ThemeMode>,
}

impl TerminalDisplay {
    pub fn from_env() -> Self {
        Self::new(std::env::var("COLORFGBG").ok())
    }

    pub fn new(colorfgbg: Option<String>) -> Self {
        Self {
            colorfgbg,
            mode: Cell::new(ThemeMode::Light),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode.get()
    }

    pub fn dialog_theme(&self) -> Box<dyn Theme> {
        match self.mode.get() {
            ThemeMode::Dark => Box::new(ColorfulTheme::default()),
            ThemeMode::Light => Box::new(SimpleTheme),
        }
    }
}

/// 端末でないとき（パイプ出力など）の表示幅
pub const FALLBACK_WIDTH: u16 = 120;

/// 指定があればそれを、なければ測った桁数を使う
pub fn resolve_width(width_override: Option<u32>, measured_columns: Option<u16>) -> f64 {
    match width_override {
        Some(width) => f64::from(width),
        None => f64::from(measured_columns.unwrap_or(FALLBACK_WIDTH)),
    }
}

/// 現在の表示幅。描画のたびに測り直す
pub fn current_width(width_override: Option<u32>) -> f64 {
    let measured = Term::stdout().size_checked().map(|(_rows, columns)| columns);
    resolve_width(width_override, measured)
}

/// 背景色番号 0-6 と 8 は暗い背景
pub fn parse_colorfgbg(value: &str) -> Option<bool> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(background, 0..=6 | 8))
}

impl DisplayEnv for TerminalDisplay {
    fn prefers_dark(&self) -> Option<bool> {
        self.colorfgbg.as_deref().and_then(parse_colorfgbg)
    }

    fn apply_theme(&self, mode: ThemeMode) {
        self.mode.set(mode);
    }
}
