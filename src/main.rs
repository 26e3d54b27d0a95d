//! echoing-library - a gothic library where three hidden books tell a ghost's story
//!
//! Headless executable: runs a session, prints the sound manifest or the scene layout.

mod command_script;
mod config;
mod headless;
mod session;

use anyhow::Result;
use bevy_ecs::world::World;
use clap::{Args, Parser, Subcommand};
use config::{LibraryConfig, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find the three hidden books of the echoing library", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a headless session (default)
    Run(RunArgs),
    /// Print the sound assets the session expects, as JSON
    Sounds,
    /// Write a config file with default settings
    InitConfig {
        /// Where to write the config
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print every labeled scene object, as JSON
    Layout {
        /// Config file to read the world seed from
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Override the world seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Config file (TOML)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
    /// JSON command script of `{tick, command}` steps
    #[arg(long)]
    script: Option<PathBuf>,
    /// Write scene events as JSON lines
    #[arg(long)]
    event_log: Option<PathBuf>,
    /// Write a JSON summary when the session ends
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Use the silent audio backend
    #[arg(long)]
    no_audio: bool,
    /// Stop as soon as every book has been found
    #[arg(long)]
    exit_when_complete: bool,
    /// Stop once every script step has run
    #[arg(long)]
    exit_when_script_finished: bool,
    /// Run frames back to back instead of at 20 TPS
    #[arg(long)]
    fast: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            seed: None,
            max_ticks: None,
            script: None,
            event_log: None,
            summary: None,
            no_audio: false,
            exit_when_complete: false,
            exit_when_script_finished: false,
            fast: false,
        }
    }
}

fn load_config(path: &std::path::Path, seed: Option<u64>) -> LibraryConfig {
    let mut config = LibraryConfig::load_from_path(path);
    if let Some(seed) = seed {
        config.world_seed = seed;
    }
    config
}

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var).
    // Logs go to stderr; stdout carries JSON output only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => {
            info!("Starting echoing-library v{}", env!("CARGO_PKG_VERSION"));
            let summary = headless::run(headless::HeadlessConfig {
                library: load_config(&args.config, args.seed),
                command_script: args.script,
                event_log: args.event_log,
                summary: args.summary,
                no_audio: args.no_audio,
                max_ticks: args.max_ticks,
                exit_when_complete: args.exit_when_complete,
                exit_when_script_finished: args.exit_when_script_finished,
                fast: args.fast,
            })?;
            println!("{}", serde_json::to_string(&summary)?);
        }
        Command::Sounds => {
            println!(
                "{}",
                serde_json::to_string_pretty(&library_audio::sound_manifest())?
            );
        }
        Command::InitConfig { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (pass --force to overwrite)", path.display());
            }
            LibraryConfig::default().save_to_path(&path)?;
            info!(path = %path.display(), "wrote default config");
        }
        Command::Layout { config, seed } => {
            let config = load_config(&config, seed);
            let mut world = World::default();
            library_scene::build_library(&mut world, config.world_seed);
            let layout = library_scene::layout_report(&mut world);
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
    }

    Ok(())
}
