//! コアの `tracing` イベントをブラウザのコンソールへ流す
//!
//! wasm32 では時刻取得ができないため、タイムスタンプは付けない。

use std::io::{self, Write};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 1イベント分を貯めて、破棄時に出力する
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        if self.level == Level::ERROR {
            gloo::console::error!(line);
        } else if self.level == Level::WARN {
            gloo::console::warn!(line);
        } else if self.level == Level::INFO {
            gloo::console::info!(line);
        } else {
            gloo::console::debug!(line);
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// 購読者を登録する。登録済みなら false
pub fn init(max_level: Level) -> bool {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleMakeWriter);

    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::from_level(max_level))
        .with(console_layer)
        .try_init()
        .is_ok()
}
