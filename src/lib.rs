//! Symlink manager driven by a JSON mapping of source to destination paths.
//!
//! A config file (`.json` or `.jsonc`) holds a `link` object whose keys are
//! source paths and whose values are destination paths.  Relative paths are
//! resolved against the config file's directory and `~` against the home
//! directory.  Each entry is linked independently: one failure never stops
//! the rest.
//!
//! - **[`config`]**: load, parse and validate the config file
//! - **[`paths`]**: resolve raw config paths to absolute paths
//! - **[`resources`]**: idempotent `check + apply` symlink primitive
//! - **[`commands`]**: top-level subcommands (`link`, `check`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod resources;
