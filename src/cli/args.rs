//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::generate::APP_JSON_V1_GENERATOR;
use crate::import::OutputFormat;

/// appimport - Import an app.json manifest as cluster objects.
#[derive(Debug, Parser)]
#[command(name = "appimport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.appimport/config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Cluster API server URL
    #[arg(long, global = true, env = "APPIMPORT_SERVER")]
    pub server: Option<String>,

    /// Target namespace
    #[arg(short, long, global = true, env = "APPIMPORT_NAMESPACE")]
    pub namespace: Option<String>,

    /// Bearer token for the API server
    #[arg(long, global = true, env = "APPIMPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import an app.json manifest
    #[command(visible_alias = "app.json")]
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `import` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ImportArgs {
    /// app.json file, directory containing app.json, URL, or `-` for stdin
    #[arg(short, long = "filename", value_name = "LOCATOR")]
    pub filenames: Vec<String>,

    /// Base image to build the repository onto, or to run directly
    #[arg(long)]
    pub image: Option<String>,

    /// Generator strategy
    #[arg(long, default_value = APP_JSON_V1_GENERATOR)]
    pub generator: String,

    /// Produce a reusable template with this name
    #[arg(long, value_name = "NAME")]
    pub as_template: Option<String>,

    /// Comma-separated group/versions to output objects as
    #[arg(long, value_name = "VERSIONS")]
    pub output_version: Option<String>,

    /// Print objects instead of creating them
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Report what would be created without creating it
    #[arg(long)]
    pub dry_run: bool,

    /// Template parameter value
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Substitute parameters locally instead of on the server
    #[arg(long)]
    pub local: bool,
}

impl Default for ImportArgs {
    fn default() -> Self {
        Self {
            filenames: Vec::new(),
            image: None,
            generator: APP_JSON_V1_GENERATOR.to_string(),
            as_template: None,
            output_version: None,
            output: None,
            dry_run: false,
            params: Vec::new(),
            local: false,
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
