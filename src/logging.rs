//! `log` backend for the browser console.
//!
//! The core logs through the `log` facade only. In the browser, records are
//! forwarded to `console.debug/info/warn/error`; natively the CLI installs
//! its own terminal logger instead.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to `web_sys::console`.
pub struct ConsoleLogger {
    level: Level,
}

impl ConsoleLogger {
    pub const fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        write_console(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{line}");
}

static LOGGER: ConsoleLogger = ConsoleLogger::new(Level::Debug);

/// Install the console logger once; later calls only adjust the level.
pub fn init(filter: LevelFilter) {
    // Already installed on a second viewer instance.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}
