//! Logging Infrastructure
//!
//! `RUST_LOG` drives the filter; without it the server logs its own
//! events and request traces at info.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "order_server=info,tower_http=info";

/// Initialize the logger on stdout
pub fn init_logger() {
    init_logger_with_file(None);
}

/// Initialize the logger, writing daily rolling files to `log_dir` when it
/// exists
///
/// Calling it twice is harmless, the second call is ignored.
pub fn init_logger_with_file(log_dir: Option<&str>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        if Path::new(dir).is_dir() {
            let file_appender = tracing_appender::rolling::daily(dir, "order-server");
            let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
        eprintln!("LOG_DIR {dir} does not exist, logging to stdout");
    }

    let _ = subscriber.try_init();
}
