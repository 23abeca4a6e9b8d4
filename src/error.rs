//! Domain-specific error types for the link engine.
//!
//! Library modules return the typed errors below; command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error kinds
//!
//! ```text
//! ConfigError   reading and parsing the config file (fatal)
//! ResolveError  turning a raw entry into an absolute path
//! LinkError     removing and creating a single link (per entry)
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading the config file.
///
/// All of these are fatal to the run: no link is attempted.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config file extension is neither `.json` nor `.jsonc`.
    #[error("config file must be either .json or .jsonc: {}", path.display())]
    UnsupportedFormat {
        /// Path of the config file.
        path: PathBuf,
    },

    /// The file contents are not valid JSON, or do not match the expected
    /// shape.
    #[error("invalid JSON in config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The contents of a `.jsonc` file could not be parsed.
    #[error("invalid JSONC in config file: {message}")]
    Syntax {
        /// Parser message, including the position.
        message: String,
    },

    /// The parsed value has no `link` object.
    #[error("cannot parse config file: missing \"link\" mapping")]
    MissingLink,
}

/// Errors that arise while resolving a raw path entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A `~`-prefixed path was given but the home directory is unknown.
    #[error("home directory cannot be found (while resolving '{raw}')")]
    HomeNotFound {
        /// The raw path that required the home directory.
        raw: String,
    },
}

/// Errors that arise while linking a single entry.
///
/// These are recorded against the entry and never abort sibling entries.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The source or destination of the entry could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The resolved source does not exist.
    #[error("source not found: {}", path.display())]
    SourceNotFound {
        /// Resolved source path.
        path: PathBuf,
    },

    /// The existing destination could not be removed.
    #[error("cannot remove existing {}: {source}", path.display())]
    Remove {
        /// Resolved destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The parent directories of the destination could not be created.
    #[error("cannot create parent directory {}: {source}", path.display())]
    CreateParent {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The symlink itself could not be created.
    #[error("cannot link {} -> {}: {source}", destination.display(), target.display())]
    Create {
        /// Path of the link being created.
        destination: PathBuf,
        /// Target stored in the link.
        target: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl LinkError {
    /// `true` for errors in the "not found" class (missing source).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_unsupported_format_display() {
        let e = ConfigError::UnsupportedFormat {
            path: PathBuf::from("links.toml"),
        };
        assert_eq!(
            e.to_string(),
            "config file must be either .json or .jsonc: links.toml"
        );
    }

    #[test]
    fn config_error_missing_link_display() {
        let e = ConfigError::MissingLink;
        assert!(e.to_string().starts_with("cannot parse config file"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("/cfg/config.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/cfg/config.json"));
        assert!(e.source().is_some());
    }

    // -----------------------------------------------------------------------
    // ResolveError / LinkError
    // -----------------------------------------------------------------------

    #[test]
    fn home_not_found_names_raw_path() {
        let e = ResolveError::HomeNotFound {
            raw: "~/.bashrc".to_string(),
        };
        assert!(e.to_string().contains("home directory cannot be found"));
        assert!(e.to_string().contains("~/.bashrc"));
    }

    #[test]
    fn source_not_found_is_not_found_class() {
        let e = LinkError::SourceNotFound {
            path: PathBuf::from("/cfg/a.txt"),
        };
        assert!(e.is_not_found());
        assert_eq!(e.to_string(), "source not found: /cfg/a.txt");
    }

    #[test]
    fn remove_error_is_not_not_found_class() {
        let e = LinkError::Remove {
            path: PathBuf::from("/cfg/dir"),
            source: io::Error::other("directory not empty"),
        };
        assert!(!e.is_not_found());
        assert!(e.to_string().contains("/cfg/dir"));
    }

    #[test]
    fn resolve_error_is_transparent_through_link_error() {
        let e: LinkError = ResolveError::HomeNotFound {
            raw: "~/x".to_string(),
        }
        .into();
        assert_eq!(
            e.to_string(),
            "home directory cannot be found (while resolving '~/x')"
        );
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ResolveError>();
        assert_send_sync::<LinkError>();
    }

    #[test]
    fn link_error_converts_to_anyhow() {
        let e = LinkError::SourceNotFound {
            path: PathBuf::from("x"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
