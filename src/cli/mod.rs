//! Command-line interface for context-keeper
//!
//! Provides the maintenance subcommands: `update`, `rank`, `generate`,
//! `sync`, `maintain`, `info`, `completions`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod completions;
mod generate;
mod info;
mod maintain;
mod rank;
mod sync;
mod update;
mod utils;

/// Maintain ranked library lists and documentation contexts for the site
#[derive(Parser)]
#[command(name = "context-keeper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (context-keeper.toml or keeper.yml)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch fresh candidates and merge them into each domain's ranked list
    Update(update::UpdateArgs),

    /// Recompute ranks from persisted data without touching the network
    Rank(rank::RankArgs),

    /// Generate context files for top-ranked repositories
    Generate(generate::GenerateArgs),

    /// Copy domain data and context files to the frontend data directory
    Sync(sync::SyncArgs),

    /// Run the full maintenance pipeline (update, generate, sync)
    Maintain(maintain::MaintainArgs),

    /// Display domain statistics without modifying anything
    Info(info::InfoArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let root = std::env::current_dir()?;
    let config = crate::config::load_config(&root, cli.config.as_deref())?;

    match cli.command {
        Commands::Update(args) => update::run(&config, args),
        Commands::Rank(args) => rank::run(&config, args),
        Commands::Generate(args) => generate::run(&config, args),
        Commands::Sync(args) => sync::run(&config, args),
        Commands::Maintain(args) => maintain::run(&config, args),
        Commands::Info(args) => info::run(&config, args),
        Commands::Completions(args) => completions::run(args),
    }
}
