//! # Helpkit Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the helpkit CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and booting the helper registry
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! Before any command runs, every helper file under `<app-root>/<helpers.directory>`
//! is loaded once into the registry (a missing helper directory is created).
//! Command handlers then receive the configuration and the booted registry.
//! All errors are propagated to this level for consistent handling.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! helpkit --help
//!
//! # Generate Helpers/Text/SlugHelper.lua
//! helpkit make text/slug
//!
//! # Show helper files with increased verbosity
//! helpkit -vv list --details
//! ```
//!
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (make, list, call)
mod common; // Shared utilities (fs)
mod core; // Core infrastructure (errors, config, templating)
mod helpers; // Name normalization, discovery and the helper registry

use crate::core::error::Result;
use crate::helpers::registry::HelperRegistry;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "helpkit",
    about = "Helpkit: generate and load project helper files",
    long_about = "Scaffold helper files from a stub and load every helper under the\n\
                  project's helper directory into an embedded Lua runtime.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Application root the helper directory is resolved against (defaults to the current directory).
    #[arg(long, env = "HELPKIT_APP_ROOT", global = true)]
    app_root: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "m")]
    Make(commands::make::MakeArgs),
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
    Call(commands::call::CallArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Loads configuration, boots the registry and dispatches the command.
fn run(cli: Cli) -> Result<()> {
    let cfg = crate::core::config::load_config().context("Failed to load helpkit configuration")?;
    let app_root = match cli.app_root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let helpers_dir = cfg.helpers_dir(&app_root);

    let mut registry = HelperRegistry::new(&helpers_dir, cfg.helpers.load_policy);
    registry.load_helpers()?;
    tracing::debug!("Loaded helper files: {:?}", registry.loaded_files());

    match cli.command {
        Commands::Make(args) => commands::make::handle_make(args, &cfg, &helpers_dir),
        Commands::List(args) => commands::list::handle_list(args, &mut registry),
        Commands::Call(args) => commands::call::handle_call(args, &registry),
    }
}
