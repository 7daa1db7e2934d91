//! Graphreel CLI - Turn graph snapshots into animations

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{animate, completions, convert, diff, replay};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "graphreel")]
#[command(author, version, about = "Animate the evolution of a graph from JSON snapshots")]
pub struct Cli {
    /// Config file (default: <config dir>/graphreel/config.toml)
    #[arg(short, long, global = true, env = "GRAPHREEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::config_file_path)
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render animation frames from a snapshot sequence
    Animate(animate::AnimateArgs),
    /// Write a DGS event log from a snapshot sequence
    Convert(convert::ConvertArgs),
    /// Render animation frames from a DGS event log
    Replay(replay::ReplayArgs),
    /// Show what a snapshot adds to the previous one
    Diff(diff::DiffArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the loaded configuration
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        let config_path = cli.config_path();
        tracing::debug!("Using config at: {:?}", config_path);

        Self {
            config: Config::load(&config_path),
            config_path,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting graphreel CLI");

    let ctx = AppContext::new(&cli);

    match &cli.command {
        Commands::Animate(args) => animate::run(args, &cli, &ctx).await?,
        Commands::Convert(args) => convert::run(args, &cli, &ctx).await?,
        Commands::Replay(args) => replay::run(args, &cli, &ctx).await?,
        Commands::Diff(args) => diff::run(args, &cli, &ctx)?,
        Commands::Config(args) => commands::config::run(args, &ctx)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
