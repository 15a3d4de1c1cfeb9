//! Logger setup plus conditional logging macros that check a module-level
//! `ENABLE_LOGS` flag.
//!
//! Usage:
//! ```ignore
//! // In your module, define the flag first:
//! const ENABLE_LOGS: bool = true;
//!
//! // Then use the macros (they're exported at the crate root):
//! crate::log_info!("This will log if ENABLE_LOGS is true");
//! ```

use log::LevelFilter;

/// Install `env_logger` with `level` as the default. `RUST_LOG`, when set,
/// takes precedence.
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

/// Map `-v` / `-q` counts onto a level, starting from `Info`.
pub fn level_for(verbose: u8, quiet: u8) -> LevelFilter {
    match (verbose, quiet) {
        (0, 0) => LevelFilter::Info,
        (_, q) if q > 1 => LevelFilter::Error,
        (_, 1) => LevelFilter::Warn,
        (1, _) => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Conditional debug logging; the calling module must define `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

/// Conditional info logging; the calling module must define `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Conditional warn logging; the calling module must define `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Conditional error logging; the calling module must define `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
