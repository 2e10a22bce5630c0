//! Book Library - interactive library management console

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_library::{
    clock::SystemClock,
    commands::CommandHandler,
    config::{AppConfig, LoggingConfig},
    console::Console,
    repository::Repository,
    services::Services,
};

#[derive(Parser, Debug)]
#[command(name = "book-library", version, about = "Track books, readers and lendings")]
struct Cli {
    /// Extra configuration file layered over config/default
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the library data files
    #[arg(long, value_name = "DIR", env = "LIBRARY_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_tracing(&config.logging)?;

    tracing::info!("Starting Book Library v{}", env!("CARGO_PKG_VERSION"));

    let repository = Repository::open(&config.storage.data_dir)
        .await
        .with_context(|| format!("Failed to open data directory {}", config.storage.data_dir.display()))?;

    let services = Services::new(repository, config.lending.clone(), Arc::new(SystemClock));
    let handler = CommandHandler::new(services);

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    console.run(&handler).await.context("Console I/O failed")?;

    tracing::info!("Book Library stopped");
    Ok(())
}

/// Log to a daily rolling file so log lines never mix with the prompt
fn init_tracing(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.directory)
        .with_context(|| format!("Failed to create log directory {}", config.directory.display()))?;

    let appender = tracing_appender::rolling::daily(&config.directory, "book-library.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("book_library={}", config.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
            .init(),
    }

    Ok(guard)
}
