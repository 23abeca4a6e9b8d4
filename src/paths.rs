//! Resolution of raw config entries into absolute paths.
//!
//! A raw entry is either home-relative (`~/...`) or relative to the directory
//! containing the config file.  Resolution is lexical: `.` and `..` segments
//! are folded without touching the filesystem, so a destination that does not
//! exist yet still resolves.
use std::path::{Component, Path, PathBuf};

use crate::error::ResolveError;

/// Environment-derived inputs to path resolution.
///
/// Captured once at startup with [`HostEnv::detect`] and passed explicitly so
/// that resolution stays deterministic and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    /// The invoking user's home directory, if it could be determined.
    pub home: Option<PathBuf>,
    /// Process working directory, used to anchor a relative config path.
    pub cwd: PathBuf,
}

impl HostEnv {
    /// Create an environment from explicit values.
    #[must_use]
    pub const fn new(home: Option<PathBuf>, cwd: PathBuf) -> Self {
        Self { home, cwd }
    }

    /// Capture the home directory and working directory of this process.
    ///
    /// The home directory comes from [`dirs::home_dir`]: `HOME` when set and
    /// non-empty, otherwise the platform's account record.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn detect() -> std::io::Result<Self> {
        Ok(Self {
            home: dirs::home_dir(),
            cwd: std::env::current_dir()?,
        })
    }
}

/// Resolve a raw config entry into an absolute, normalized path.
///
/// - `~` or `~/rest` resolves against the home directory.
/// - Anything else resolves against the directory containing `config_path`,
///   which is itself anchored at `env.cwd` when relative.  A leading root is
///   dropped, so `/etc/x` lands at `<config dir>/etc/x` just like `./etc/x`.
///
/// # Errors
///
/// Returns [`ResolveError::HomeNotFound`] when `raw` starts with `~` and
/// `env.home` is `None`.
pub fn resolve(raw: &str, config_path: &Path, env: &HostEnv) -> Result<PathBuf, ResolveError> {
    if let Some(rest) = raw.strip_prefix('~') {
        let home = env
            .home
            .as_deref()
            .ok_or_else(|| ResolveError::HomeNotFound {
                raw: raw.to_string(),
            })?;
        let rest = rest.trim_start_matches(std::path::is_separator);
        return Ok(normalize(&absolute(home, &env.cwd).join(rest)));
    }

    let base = config_dir(config_path);
    Ok(normalize(&absolute(base, &env.cwd).join(without_root(raw))))
}

/// `raw` with any prefix or root component removed.
fn without_root(raw: &str) -> PathBuf {
    Path::new(raw)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect()
}

/// Directory containing the config file; empty for a bare file name.
fn config_dir(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or_else(|| Path::new(""))
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Fold `.` and `..` segments lexically.
///
/// `..` never climbs above the root of an absolute path.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
        }
    }
    out
}
