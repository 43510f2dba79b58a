//! CLI argument parsing using clap derive

use std::path::PathBuf;

use casper_core::Format;
use clap::{Args, Parser, Subcommand};

/// casper - Keep a key-value store in line with a rendered config template
#[derive(Parser, Debug)]
#[command(name = "casper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project config file
    #[arg(short, long, global = true, env = "CASPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the current contents of the store
    Fetch {
        /// Output format (yaml, json, jsonraw)
        #[arg(short, long, default_value = "yaml", value_parser = parse_format)]
        format: Format,

        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Render the template with its sources and print it
    Build {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Show what push would change in the store
    Diff {
        #[command(flatten)]
        build: BuildArgs,

        #[command(flatten)]
        storage: StorageArgs,

        #[command(flatten)]
        output: DiffArgs,
    },

    /// Apply the rendered template to the store
    ///
    /// Prints the diff and asks for confirmation before changing anything.
    ///
    /// Examples:
    ///   casper push                      # Confirm interactively
    ///   casper push --force              # Apply without asking
    ///   casper push --key db/host -s host=db1
    Push {
        #[command(flatten)]
        build: BuildArgs,

        #[command(flatten)]
        storage: StorageArgs,

        #[command(flatten)]
        output: DiffArgs,

        /// Apply without asking for confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Template and value sources
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    /// Template file (overrides the config)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Value source descriptor, may repeat; later sources win
    #[arg(short = 's', long = "source")]
    pub sources: Vec<String>,

    /// Format the rendered template is decoded as (yaml, json)
    #[arg(long, value_parser = parse_format)]
    pub template_format: Option<Format>,
}

/// Store selection
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageArgs {
    /// Storage backend (file)
    #[arg(long)]
    pub storage: Option<String>,

    /// Document path for the file backend
    #[arg(long)]
    pub storage_path: Option<PathBuf>,

    /// Ignore marker value; empty disables it
    #[arg(long)]
    pub ignore: Option<String>,
}

/// Diff presentation
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffArgs {
    /// Only consider the change for this exact key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Flat key/value diff instead of nested YAML
    #[arg(long)]
    pub plain: bool,

    /// Output changes as JSON for scripting
    #[arg(long, conflicts_with = "plain")]
    pub json: bool,
}

fn parse_format(s: &str) -> Result<Format, String> {
    s.parse::<Format>().map_err(|e| e.to_string())
}
