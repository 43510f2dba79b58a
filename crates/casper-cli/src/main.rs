//! casper CLI
//!
//! Renders a config template from its value sources and reconciles a
//! key-value store against the result.

mod cli;
mod commands;
mod config;
mod context;
mod error;

use std::io::{self, Write};

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::load(cli.config.as_deref()).map_err(|e| e.during("creating context"))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Fetch { format, storage } => {
            commands::run_fetch(&ctx.with_storage_args(&storage), format, &mut out)
        }
        Commands::Build { build } => {
            let ctx = ctx
                .with_build_args(&build)
                .map_err(|e| e.during("creating context"))?;
            commands::run_build(&ctx, &mut out)
        }
        Commands::Diff {
            build,
            storage,
            output,
        } => {
            let ctx = ctx
                .with_build_args(&build)
                .map_err(|e| e.during("creating context"))?
                .with_storage_args(&storage);
            commands::run_diff(&ctx, &output, &mut out)
        }
        Commands::Push {
            build,
            storage,
            output,
            force,
        } => {
            let ctx = ctx
                .with_build_args(&build)
                .map_err(|e| e.during("creating context"))?
                .with_storage_args(&storage);
            commands::run_push(&ctx, &output, force, &mut out)
        }
    };
    result?;
    out.flush()?;
    Ok(())
}

/// Log to stderr: everything at debug with `--verbose`, otherwise whatever
/// `RUST_LOG` asks for.
fn init_tracing(verbose: bool) {
    let installed = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        return;
    };
    if installed.is_ok() {
        tracing::debug!("Logging enabled");
    }
}
