use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use plantdesk::config::{DEFAULT_CONFIG_FILE, PlantdeskConfig};
use plantdesk::refdata::models::ReferenceKind;

mod cmd;

#[derive(Parser)]
#[command(name = "plantdesk")]
#[command(version, about = "Factory desk reference-data service")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Database path (overrides server.db_path)
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to serve on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable dev mode (permissive CORS for a local front-end dev server)
        #[arg(long)]
        dev: bool,
    },
    /// Create the database
    Init {
        /// Also write the built-in collections into empty tables
        #[arg(long)]
        seed: bool,
    },
    /// Resolve one reference kind and print it as JSON
    Show {
        /// department, category, priority or status
        kind: ReferenceKind,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Validate configuration and report any problems
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PlantdeskConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = &cli.db_path {
        config.server.db_path = db_path.clone();
    }
    if let Commands::Serve { port, dev } = &cli.command {
        if let Some(port) = port {
            config.server.port = *port;
        }
        config.server.cors_permissive |= *dev;
    }

    match &cli.command {
        Commands::Config { command } => cmd::cmd_config(&cli.config, &config, command.clone())?,
        Commands::Serve { .. } => {
            start_logging(&cli, &config)?;
            cmd::cmd_serve(&config).await?
        }
        Commands::Init { seed } => {
            start_logging(&cli, &config)?;
            cmd::cmd_init(&config, *seed)?
        }
        Commands::Show { kind } => {
            start_logging(&cli, &config)?;
            cmd::cmd_show(&config, *kind).await?
        }
    }

    Ok(())
}

/// Reject unusable configuration, then install the tracing subscriber.
fn start_logging(cli: &Cli, config: &PlantdeskConfig) -> Result<()> {
    let problems = config.validate();
    if !problems.is_empty() {
        bail!("Invalid configuration:\n  {}", problems.join("\n  "));
    }
    plantdesk::telemetry::init_tracing(&config.logging, cli.verbose)
}
