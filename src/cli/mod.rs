//! CLI argument parsing for confgen.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Confgen: profile-aware configuration materialization for service builds.
///
/// Resolves an active deployment profile, merges layered property sources,
/// expands profile-scoped overrides, renders templates by placeholder
/// substitution, and writes the artifacts to a profile-resolved destination.
#[derive(Parser, Debug)]
#[command(name = "confgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for confgen.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate all configured artifacts.
    ///
    /// Resolves the profile, loads and expands properties, renders every
    /// template, and writes the artifacts to the resolved output directory.
    /// Idempotent: unchanged inputs produce byte-identical output.
    Generate(GenerateArgs),

    /// Show the resolved profile and where it came from.
    ///
    /// Applies the same resolution rules as `generate` without touching
    /// property sources or templates.
    Profile(ProfileArgs),
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Deployment profile (dev, prod, test). Overrides environment and
    /// invocation-based inference.
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Names of the build tasks that triggered this run, used to infer the
    /// profile when none is given explicitly.
    #[arg(long, value_delimiter = ',')]
    pub invoked_by: Vec<String>,

    /// Path to the config file (default: confgen.yaml at the project root).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project root that sources and templates are resolved against
    /// (default: current directory).
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Scratch directory for dev output (default: $CONFGEN_SCRATCH_DIR,
    /// then the system temp directory).
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,
}

/// Arguments for the `profile` command.
#[derive(Parser, Debug)]
pub struct ProfileArgs {
    /// Deployment profile (dev, prod, test). Overrides environment and
    /// invocation-based inference.
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Names of the build tasks that triggered this run.
    #[arg(long, value_delimiter = ',')]
    pub invoked_by: Vec<String>,

    /// Path to the config file (default: confgen.yaml at the project root).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project root (default: current directory).
    #[arg(long)]
    pub project_root: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments from the process command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
