use crate::models::LoggingSettings;
use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for the configured verbosity.
fn filter_directive(debug_mode: bool) -> &'static str {
    if debug_mode { "debug" } else { "info" }
}

/// Create the log directory if needed.
fn ensure_log_dir(dir: &Utf8Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir))?;
    }
    Ok(())
}

/// Install the global subscriber.
///
/// Always writes to a daily rotating file `{directory}/{prefix}.YYYY-MM-DD`;
/// mirrors to the console with colors when `settings.console` is set.
///
/// # Returns
/// The file writer's guard. Hold it until shutdown or buffered lines are lost.
pub fn setup_logging(settings: &LoggingSettings) -> Result<WorkerGuard> {
    let log_dir = Utf8Path::new(&settings.directory);
    ensure_log_dir(log_dir)?;

    let file_appender = rolling::daily(log_dir, &settings.prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let console_layer = settings.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive(settings.debug_mode)))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, debug={}, console={}",
        settings.directory,
        settings.prefix,
        settings.debug_mode,
        settings.console
    );

    Ok(guard)
}
