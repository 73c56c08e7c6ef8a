#![deny(unsafe_code)]

//! AEOS CLI: ask the division router from the command line.

mod render;
mod session;

use std::path::{Path, PathBuf};

use aeos_config::AppConfig;
use aeos_core::{CostLedger, Registry, Sealed, build_registry};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// AEOS: route free-text queries to specialised divisions.
#[derive(Parser)]
#[command(name = "aeos", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "aeos.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch a single query.
    Ask {
        /// The query text.
        query: String,

        /// Send straight to this division (id or name), bypassing routing.
        #[arg(short, long)]
        division: Option<String>,

        /// Print the full result envelope as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List registered divisions in routing order.
    Divisions,

    /// Read queries from stdin, one per line, and print a cost summary at EOF.
    Session,

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, from_file) = load_config(&cli.config).await?;

    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if from_file {
        debug!(path = %cli.config.display(), "Loaded config file");
    } else {
        info!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    match cli.command {
        Commands::Ask {
            query,
            division,
            json,
        } => cmd_ask(&config, &query, division.as_deref(), json)?,
        Commands::Divisions => cmd_divisions(&config)?,
        Commands::Session => cmd_session(&config).await?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
    }

    Ok(())
}

fn cmd_ask(config: &AppConfig, query: &str, division: Option<&str>, json: bool) -> Result<()> {
    let registry = registry_from(config)?;
    let router = registry.router();
    let routed = match division {
        Some(target) => router.dispatch_to(target, query)?,
        None => router.route(query)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&routed.envelope)?);
    } else {
        print!("{}", render::routed(&routed));
    }
    Ok(())
}

fn cmd_divisions(config: &AppConfig) -> Result<()> {
    let registry = registry_from(config)?;
    print!("{}", render::divisions(&registry));
    Ok(())
}

async fn cmd_session(config: &AppConfig) -> Result<()> {
    let registry = registry_from(config)?;
    let ledger = CostLedger::new(config.ledger.capacity);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout().lock();

    session::run(&registry, &ledger, stdin, &mut stdout).await?;
    print!("{}", render::summary(&ledger));
    Ok(())
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str =
            toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {e}"))?;
        println!("{toml_str}");
    } else {
        registry_from(config)?;
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

fn registry_from(config: &AppConfig) -> Result<Registry<Sealed>> {
    build_registry(config).context("failed to assemble division registry")
}

/// Load the config file, or defaults when it does not exist. The flag is
/// `true` when the file was read.
async fn load_config(path: &Path) -> Result<(AppConfig, bool)> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        let config = AppConfig::load(path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?;
        Ok((config, true))
    } else {
        Ok((AppConfig::default(), false))
    }
}
