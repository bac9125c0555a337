/* src/client/router/wasm/src/console.rs */

// tracing output for the browser: one console call per event, routed by level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

pub(crate) struct ConsoleWriter {
  level: Level,
  buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
  fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
    self.buf.extend_from_slice(bytes);
    Ok(bytes.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl Drop for ConsoleWriter {
  fn drop(&mut self) {
    if self.buf.is_empty() {
      return;
    }
    let text = String::from_utf8_lossy(&self.buf);
    let line = JsValue::from_str(text.trim_end());
    match self.level {
      Level::ERROR => web_sys::console::error_1(&line),
      Level::WARN => web_sys::console::warn_1(&line),
      Level::INFO => web_sys::console::info_1(&line),
      _ => web_sys::console::debug_1(&line),
    }
  }
}

pub(crate) struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
  type Writer = ConsoleWriter;

  fn make_writer(&'a self) -> Self::Writer {
    ConsoleWriter { level: Level::INFO, buf: Vec::new() }
  }

  fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
    ConsoleWriter { level: *meta.level(), buf: Vec::new() }
  }
}

/// Installs the console subscriber. Unknown level names fall back to info;
/// a second call is ignored.
pub(crate) fn init(level: &str) {
  let level = level.parse::<Level>().unwrap_or(Level::INFO);
  let _ = tracing_subscriber::fmt()
    .with_writer(MakeConsoleWriter)
    .with_ansi(false)
    .without_time()
    .with_max_level(level)
    .try_init();
}
