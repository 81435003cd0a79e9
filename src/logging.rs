//! File-based logging setup for embedders
//!
//! The engine itself only emits `tracing` events. Embedders that want file
//! logs out of the box can call [`init_logging`]; hosts with their own
//! subscriber should skip it and install their own.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "embedplay";

/// Initialize the logging system.
///
/// Logs are written to `.logs/embedplay.YYYY-MM-DD.log` with daily
/// rotation. The log level can be controlled via the `RUST_LOG` environment
/// variable; the default keeps the engine at DEBUG and everything else at
/// WARN.
pub fn init_logging() -> anyhow::Result<()> {
    // Ensure log directory exists
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    // Non-blocking writer so logging never stalls the event loop
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard must outlive the process; leak it rather than thread it
    // through every embedder.
    Box::leak(Box::new(guard));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("embedplay=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);

    Ok(())
}
