//! Logging Setup
//!
//! Installs the global `tracing` subscriber:
//! - stdout layer, pretty or JSON
//! - optional daily-rolling JSON file layer in `log_dir`
//! - `RUST_LOG` overrides the configured filter directive

use std::fs;
use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "pokedex.log";

/// Build the filter: `RUST_LOG` first, then the configured directive.
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system.
///
/// Returns the file writer's `WorkerGuard` when a file layer was set up; keep
/// it alive for the life of the process so buffered lines get flushed.
/// Calling this more than once leaves the first subscriber in place.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let (file_layer, guard) = match &config.log_dir {
        Some(log_dir) => {
            if let Err(e) = fs::create_dir_all(log_dir) {
                eprintln!("Failed to create logs directory {}: {}", log_dir.display(), e);
            }
            let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_filter(build_filter(config));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_stdout = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .json()
            .with_filter(build_filter(config))
    });
    let pretty_stdout = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .pretty()
            .with_filter(build_filter(config))
    });

    let result = tracing_subscriber::registry()
        .with(file_layer)
        .with(json_stdout)
        .with(pretty_stdout)
        .try_init();

    match result {
        Ok(()) => {
            tracing::info!(
                filter = %config.filter,
                log_dir = ?config.log_dir,
                "Logging initialized"
            );
            guard
        }
        Err(e) => {
            tracing::debug!("Logging already initialized: {}", e);
            None
        }
    }
}
