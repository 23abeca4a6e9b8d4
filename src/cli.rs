//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "./config.json";

/// Top-level CLI entry point for the symlink manager.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Create symlinks from a JSON mapping of source to destination paths",
    version
)]
pub struct Cli {
    // Without a subcommand, or with an unknown one, the config is loaded and
    // validated only.
    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[allow(missing_docs)]
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Config file (.json or .jsonc); relative link paths resolve against its directory
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create every configured symlink, replacing what is at each destination
    Link,
    /// Report which configured symlinks are missing or wrong
    Check,
    /// Print version information
    Version,
    /// Any other subcommand: load the config only
    #[command(external_subcommand)]
    Other(Vec<String>),
}
