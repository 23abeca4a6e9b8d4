//! Config file loading.
//!
//! The config file is a JSON (`.json`) or JSONC (`.jsonc`: comments and
//! trailing commas allowed) object:
//!
//! ```text
//! { "global"?: { "replace": bool, "relative": bool },
//!   "link": { "<source-path>": "<destination-path>", ... } }
//! ```
pub mod validation;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jsonc_parser::{ParseOptions, parse_to_serde_value};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, ResolveError};
use crate::paths::{self, HostEnv};

/// Run-wide options from the `global` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GlobalOptions {
    /// Replace whatever exists at a destination; when `false`, occupied
    /// destinations are skipped.
    pub replace: bool,
    /// Store link targets relative to the destination's directory.
    pub relative: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            replace: true,
            relative: false,
        }
    }
}

/// Loaded configuration, held immutably for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Global options (defaults when the file has no `global` object).
    pub global: GlobalOptions,
    /// Source path to destination path, as written in the file.
    ///
    /// Sorted so that entries are processed in a stable order.
    pub link: BTreeMap<String, String>,
}

/// On-disk shape, after the presence of `link` has been checked.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    global: Option<GlobalOptions>,
    link: BTreeMap<String, String>,
}

/// Syntax of the config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Plain JSON (`.json`).
    Json,
    /// JSON with `//` and `/* */` comments and trailing commas (`.jsonc`).
    Jsonc,
}

impl ConfigFormat {
    /// Pick the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any extension other than
    /// `json` or `jsonc`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("jsonc") => Ok(Self::Jsonc),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl Config {
    /// Read and parse the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unsupported, the file cannot be
    /// read, the contents are not valid JSON, or there is no `link` mapping.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, format)
    }

    /// Parse config file contents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields,
    /// [`ConfigError::Syntax`] for malformed JSONC, and
    /// [`ConfigError::MissingLink`] when the value has no `link` mapping.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let value: Value = match format {
            ConfigFormat::Json => serde_json::from_str(contents)?,
            ConfigFormat::Jsonc => parse_to_serde_value(contents, &ParseOptions::default())
                .map_err(|e| ConfigError::Syntax {
                    message: e.to_string(),
                })?
                .unwrap_or(Value::Null),
        };

        if value.get("link").is_none_or(Value::is_null) {
            return Err(ConfigError::MissingLink);
        }

        let raw: RawConfig = serde_json::from_value(value)?;
        Ok(Self {
            global: raw.global.unwrap_or_default(),
            link: raw.link,
        })
    }

    /// Number of entries in the link mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.link.len()
    }

    /// `true` when the link mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.link.is_empty()
    }

    /// Resolve every entry of the link mapping, in source order.
    ///
    /// Each item carries the raw source and destination alongside the
    /// resolution result, so a failure stays scoped to its own entry.
    pub fn resolve_entries<'a>(
        &'a self,
        config_path: &'a Path,
        env: &'a HostEnv,
    ) -> impl Iterator<Item = (&'a str, &'a str, Result<LinkEntry, ResolveError>)> + 'a {
        self.link.iter().map(move |(source, destination)| {
            (
                source.as_str(),
                destination.as_str(),
                LinkEntry::resolve(source, destination, config_path, env),
            )
        })
    }
}

/// One entry of the link mapping with both sides resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Source as written in the config.
    pub raw_source: String,
    /// Destination as written in the config.
    pub raw_destination: String,
    /// Absolute path the link will point at.
    pub source: PathBuf,
    /// Absolute path of the link itself.
    pub destination: PathBuf,
}

impl LinkEntry {
    /// Resolve both sides of a mapping entry.
    ///
    /// # Errors
    ///
    /// Returns an error if either side needs the home directory and it is
    /// unknown.
    pub fn resolve(
        raw_source: &str,
        raw_destination: &str,
        config_path: &Path,
        env: &HostEnv,
    ) -> Result<Self, ResolveError> {
        Ok(Self {
            raw_source: raw_source.to_string(),
            raw_destination: raw_destination.to_string(),
            source: paths::resolve(raw_source, config_path, env)?,
            destination: paths::resolve(raw_destination, config_path, env)?,
        })
    }
}
