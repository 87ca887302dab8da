//! Logging setup
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=sqlpad::watcher=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/sqlpad/logs/sqlpad.log` with daily
//! rotation, always at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so it does not interleave with the
/// terminal surface on stdout.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_thread_names(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
