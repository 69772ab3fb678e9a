// apidocs - Terminal browser for REST API documentation
//
// Architecture:
// - Content registry: static documentation sections compiled into the binary
// - Navigation tree: collapsible outline emitting section selections
// - Theme state: dark/light palette with a persisted preference
// - TUI (ratatui): header, sidebar, content pane with copyable code samples
// - CLI (clap): headless list/show/config commands

mod cli;
mod config;
mod content;
mod logging;
mod nav;
mod theme;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use theme::{FilePreferenceStore, ThemeState};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration: a broken config file is fatal
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            Config::report_error(&Config::config_path(), &e);
            std::process::exit(1);
        }
    };
    if let Some(section) = cli.section {
        config.default_section = section;
    }

    // Headless subcommands log to stderr and exit
    if let Some(command) = cli.command {
        let _file_guard = init_tracing(&config.logging, None);
        return cli::run_command(command, &config);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // In TUI mode logs go to an in-memory buffer so they can't garble the display
    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config.logging, Some(log_buffer.clone()));

    tracing::info!(
        version = config::VERSION,
        section = %config.default_section,
        "Starting apidocs"
    );

    let mut theme = ThemeState::new(Box::new(FilePreferenceStore::in_dir(&config.config_dir)));
    theme.initialize(config.system_theme.prefers_dark());

    if let Err(e) = tui::run_tui(config, theme, log_buffer).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Install the global subscriber
///
/// Filter priority: RUST_LOG > config `[logging].level` > info. With a
/// buffer, events are captured by [`TuiLogLayer`]; without one they go to
/// stderr. File logging (JSON, rotating) is added on top when enabled. The
/// returned guard must live until exit so buffered file logs flush.
fn init_tracing(logging: &LoggingConfig, buffer: Option<LogBuffer>) -> Option<WorkerGuard> {
    let default_filter = format!("apidocs={}", logging.level);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let (file_layer, guard) = if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => {
                let file_appender = match logging.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                    }
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {}: {}",
                    logging.file_dir.display(),
                    e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let stderr_layer = buffer
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(buffer.map(TuiLogLayer::new))
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
