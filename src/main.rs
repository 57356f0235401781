//! enchantable - per-world enchanted anvils and freezable furnaces
//!
//! Command-line driver for combining items at the anvil and replaying
//! enchanted furnace runs.

mod config;
mod replay;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use enchantable_world::EnchantableSettings;
use scenario::Scenario;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-world enchanted anvils and freezable furnaces", long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Fail on unreadable or invalid configuration instead of using defaults
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Combine the two items of a JSON scenario and print the result
    Anvil {
        /// Scenario file (JSON)
        #[arg(long)]
        scenario: PathBuf,
    },
    /// Replay an enchanted furnace and print its events as JSON lines
    Furnace {
        /// Number of ticks to run
        #[arg(long, default_value_t = 200)]
        ticks: u64,

        /// World whose furnace settings apply
        #[arg(long, default_value = "world")]
        world: String,
    },
}

fn main() -> Result<()> {
    // WARN by default, overridable through RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Anvil { scenario } => {
            let report = Scenario::load(&scenario)?.run(&settings)?;
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        Command::Furnace { ticks, world } => {
            let events = replay::run_furnace_replay(settings.furnace(&world), ticks);
            info!(%world, ticks, events = events.len(), "furnace replay done");
            for event in events {
                serde_json::to_writer(&mut out, &event)?;
                writeln!(out)?;
            }
        }
    }
    out.flush().context("Failed to flush output")
}

fn load_settings(args: &Args) -> Result<EnchantableSettings> {
    if args.strict {
        return config::load_strict(&args.config);
    }
    Ok(config::load_from_path(&args.config).resolve())
}
