//! `log` backend writing to the browser console.
//!
//! Every line carries the module title prefix so it can be filtered in the
//! developer tools.

use log::{Level, LevelFilter, Log, Metadata, Record};

pub(crate) const PREFIX: &str = "Zoom/Pan Options |";

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        write_console(record.level(), &format_line(record.level(), record.args()));
    }

    fn flush(&self) {}
}

pub(crate) fn format_line(level: Level, args: &std::fmt::Arguments) -> String {
    match level {
        Level::Debug | Level::Trace => format!("{PREFIX} [{}] {args}", level.as_str().to_lowercase()),
        _ => format!("{PREFIX} {args}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let msg = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&msg),
        Level::Warn => web_sys::console::warn_1(&msg),
        Level::Info => web_sys::console::log_1(&msg),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Parse a level name from the JS side; unknown names fall back to `info`.
pub(crate) fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

/// Install the console logger once. Later calls only adjust the level.
pub(crate) fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
