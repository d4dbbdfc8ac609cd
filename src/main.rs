//! Progress Helper - mark online-course sections complete.
//!
//! Main entry point for the Progress Helper CLI.

mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use progress_helper_config::{home_dir, Config, ConfigLoader, ConfigValidator};
use progress_helper_page::TabTransport;
use progress_helper_store::{FileStore, LastSpec};

use crate::cli::{Cli, Commands};

/// Initialize tracing with console output on stderr and a daily log file
/// under `~/.progress-helper/logs`.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = home_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("progress-helper")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the writer flushing until the process exits.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path())?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.browser.endpoint = endpoint.clone();
    }

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in warnings {
        warn!("Config: {}: {}", warning.path, warning.message);
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    // Parsing needs neither config nor browser.
    if let Commands::Parse { spec } = &cli.command {
        return Ok(commands::parse(spec));
    }

    let config = load_config(&cli)?;
    debug!("Using browser endpoint {}", config.browser.endpoint);

    let last_spec = LastSpec::new(Arc::new(FileStore::new(&config.storage.state_file)));
    let transport = || TabTransport::from_config(&config);

    let output = match cli.command {
        Commands::Tick { spec, delay } => {
            commands::tick(&transport()?, &last_spec, spec, delay).await?
        }
        Commands::Select { sections } => {
            commands::select(&transport()?, &last_spec, &sections).await?
        }
        Commands::Sections { format } => commands::sections(&transport()?, format).await?,
        Commands::MarkAll => commands::mark_all(&transport()?, &config.ticker).await?,
        Commands::Save { spec } => commands::save(&last_spec, &spec).await?,
        Commands::Last => commands::last(&last_spec).await?,
        Commands::Parse { spec } => commands::parse(&spec),
    };

    Ok(output)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
