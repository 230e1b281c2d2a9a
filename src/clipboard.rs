//! 端末クリップボード（OSC 52）
//!
//! エスケープシーケンスを出力し、端末側にコピーさせる。
//! Ghostty、iTerm2、kitty、WezTermなど多くの端末で動作する。

use base64::Engine;
use mail_triage_common::Clipboard;
use std::cell::RefCell;
use std::io::Write;

pub struct Osc52Clipboard<W: Write> {
    out: RefCell<W>,
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    type Error = std::io::Error;

    async fn write_text(&self, text: &str) -> Result<(), Self::Error> {
        let mut out = self.out.borrow_mut();
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()
    }
}
