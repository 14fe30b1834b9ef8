//! Logging facade shared by the couchfs crates.
//!
//! The level comes from the `COUCHFS_LOG` environment variable:
//! - `off` (default): nothing is emitted
//! - `error`, `warn`, `info`, `debug`: minimum level written to stderr
//!
//! Unknown values fall back to `info`.

use std::sync::Once;

// Re-export emit so the macros resolve from any crate
pub use emit;

/// Environment variable holding the log level
pub const LOG_ENV: &str = "COUCHFS_LOG";

static INIT: Once = Once::new();

/// Parse a `COUCHFS_LOG` value.
///
/// `Ok(None)` means logging is off, `Err(value)` means the value is not a
/// known level.
pub fn parse_level(value: &str) -> Result<Option<emit::Level>, &str> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "off" => Ok(None),
        "error" => Ok(Some(emit::Level::Error)),
        "warn" => Ok(Some(emit::Level::Warn)),
        "info" => Ok(Some(emit::Level::Info)),
        "debug" => Ok(Some(emit::Level::Debug)),
        _ => Err(value),
    }
}

/// Initialize diagnostics from `COUCHFS_LOG`.
///
/// Call once at startup; later calls are ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let level = match parse_level(&value) {
            Ok(None) => return,
            Ok(Some(level)) => level,
            Err(unknown) => {
                // Bootstrap warning, the emitter is not running yet
                eprintln!("Warning: Unknown {LOG_ENV} value '{unknown}', using 'info'");
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // The emitter lives for the whole process
        std::mem::forget(rt);
    });
}

/// Log normal operations (mounts, listings).
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (fetched statuses, decode fallbacks).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable conditions.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that abort an operation.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}
