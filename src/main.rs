//! folio - A static site generator for single-page portfolios.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod core;
mod embed;
mod logger;
mod registry;
mod render;
mod theme;
mod tracker;
mod ui;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = init_config(SiteConfig::load(cli)?);

    match &cli.command {
        Commands::Init { name } => cli::init::new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config, false).map(|_| ()),
        Commands::Serve { .. } => cli::serve::serve_site(),
        Commands::Validate => cli::validate::validate_site(&config),
        Commands::Scheme { action } => cli::scheme::run_scheme(&config, action.as_ref()),
    }
}
