//! Log setup for the browser build.
//!
//! Records from the `log` macros are routed to the browser console by
//! `wasm-logger`. Verbosity is governed by `log::max_level`, so the host can
//! raise or lower it after startup.

use log::{Level, LevelFilter};

/// Install the console logger and set the starting verbosity.
///
/// The logger itself passes every level through; `level` only sets the
/// initial maximum.
pub fn init(level: LevelFilter) {
    wasm_logger::init(wasm_logger::Config::new(Level::Trace));
    set_level(level);
}

/// Change verbosity at runtime.
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}

/// Parse a level name (`"off"`, `"error"`, ..., `"trace"`), case-insensitive.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_set_level_updates_max_level() {
        set_level(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        set_level(LevelFilter::Off);
        assert_eq!(log::max_level(), LevelFilter::Off);
    }
}
