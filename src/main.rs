mod commands;
mod fetch;
mod render;
mod utils;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use dayname_core::config::DaynameConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dayname")]
#[command(about = "Scrape the day-name page, check its dates and keep a local calendar in sync")]
struct Cli {
    /// Config file to use instead of ~/.config/dayname/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the page, update the calendar and queue a notification for changes
    Check {
        /// Read the page from this file instead of fetching it
        #[arg(long)]
        file: Option<PathBuf>,

        /// Parse and validate only, don't touch the calendar or the outbox
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the events found on the page
    Parse {
        /// Read the page from this file instead of fetching it
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show the config file path (creating a default one if missing)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, dry_run } => {
            // Unreadable config still gets a notice, sent to the default locations
            let config = match load_config(cli.config.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    commands::check::report_error(&DaynameConfig::default(), &e);
                    return Err(e);
                }
            };
            commands::check::run(&config, file.as_deref(), dry_run).await
        }
        Commands::Parse { file } => {
            let config = load_config(cli.config.as_deref())?;
            commands::parse::run(&config, file.as_deref()).await
        }
        Commands::Config => commands::config::run(cli.config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<DaynameConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            DaynameConfig::load_from(path)?
        }
        None => DaynameConfig::load()?,
    };

    tracing::debug!("Configuration loaded: {:?}", config);
    Ok(config)
}
