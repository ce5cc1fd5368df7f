//! autocheck - keyword-driven checkbox selection for HTML pages.

mod cli;
mod cmd_keywords;
mod cmd_scan;
mod input;

use std::sync::OnceLock;

use clap::Parser;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use autocheck_config::{ConfigLoader, LoggingConfig};
use autocheck_store::FileKeywordStore;

use crate::cli::{Cli, Commands};
use crate::cmd_keywords::{handle_keywords_command, handle_stats_command};
use crate::cmd_scan::{ScanOptions, handle_scan_command};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize tracing with console output and an optional daily log file.
///
/// Console output goes to stderr so stdout stays machine readable.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let file_layer = if logging.file {
        let log_dir = ConfigLoader::expand_path(&logging.directory);
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("autocheck")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let _ = LOG_GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, warnings) = ConfigLoader::load_validated(&cli.config)?;
    init_tracing(&config.logging)?;
    for warning in warnings {
        warn!(path = %warning.path, "Configuration warning: {}", warning.message);
    }

    let store_path = cli
        .store
        .unwrap_or_else(|| ConfigLoader::expand_path(&config.store.path));
    let store = FileKeywordStore::new(store_path);

    match cli.command {
        Commands::Scan {
            input,
            keywords,
            json,
            show_matches,
        } => {
            let options = ScanOptions {
                input: &input,
                keywords,
                json,
                show_matches,
            };
            handle_scan_command(&store, &config.scan, options).await
        }
        Commands::Keywords { action } => handle_keywords_command(&store, action).await,
        Commands::Stats => handle_stats_command(&store).await,
    }
}
