//! Symlink resource.
use std::io;
use std::path::{Path, PathBuf};

use super::helpers::fs::{create_symlink, ensure_parent_dir, remove_existing};
use super::{Resource, ResourceChange, ResourceState};
use crate::config::{GlobalOptions, LinkEntry};
use crate::error::LinkError;
use crate::paths::normalize;

/// A symlink at `destination` pointing at `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The file or directory the link points at.
    pub source: PathBuf,
    /// Where the link itself lives.
    pub destination: PathBuf,
    /// Remove an occupied destination; skip the entry otherwise.
    pub replace: bool,
    /// Store the target relative to the destination's directory.
    pub relative: bool,
}

impl SymlinkResource {
    /// Create a symlink resource with default options (replace, absolute).
    #[must_use]
    pub fn new(source: PathBuf, destination: PathBuf) -> Self {
        let options = GlobalOptions::default();
        Self {
            source,
            destination,
            replace: options.replace,
            relative: options.relative,
        }
    }

    /// Build the resource for a resolved config entry.
    #[must_use]
    pub fn from_entry(entry: &LinkEntry, options: GlobalOptions) -> Self {
        Self {
            source: entry.source.clone(),
            destination: entry.destination.clone(),
            replace: options.replace,
            relative: options.relative,
        }
    }

    /// The path stored inside the link.
    ///
    /// The absolute source, or the source relative to the destination's
    /// parent directory when `relative` is set.
    #[must_use]
    pub fn link_target(&self) -> PathBuf {
        if self.relative
            && let Some(parent) = self.destination.parent()
            && let Some(relative) = pathdiff::diff_paths(&self.source, parent)
        {
            return relative;
        }
        self.source.clone()
    }

    /// `true` if anything, including a dangling symlink, is at the source.
    fn source_exists(&self) -> bool {
        self.source.symlink_metadata().is_ok()
    }

    /// `true` if the destination is a link that resolves to the source,
    /// whether it was stored relative or absolute.
    fn points_to_source(&self) -> bool {
        std::fs::read_link(&self.destination).is_ok_and(|existing| {
            let parent = self.destination.parent().unwrap_or_else(|| Path::new(""));
            normalize(&parent.join(existing)) == self.source
        })
    }

    /// Checks shared by [`plan`](Resource::plan) and [`apply`](Resource::apply).
    ///
    /// Returns `Some(change)` when the entry is settled without touching the
    /// filesystem.
    fn preflight(&self) -> Result<Option<ResourceChange>, LinkError> {
        if !self.source_exists() {
            return Err(LinkError::SourceNotFound {
                path: self.source.clone(),
            });
        }

        if self.source == self.destination {
            return Ok(Some(ResourceChange::Skipped {
                reason: "source and destination are the same path".to_string(),
            }));
        }

        if !self.replace && self.destination.symlink_metadata().is_ok() {
            if self.points_to_source() {
                return Ok(Some(ResourceChange::AlreadyCorrect));
            }
            return Ok(Some(ResourceChange::Skipped {
                reason: format!(
                    "destination exists and replace is disabled: {}",
                    self.destination.display()
                ),
            }));
        }

        Ok(None)
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.destination.display(), self.source.display())
    }

    fn current_state(&self) -> io::Result<ResourceState> {
        if !self.source_exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }

        let meta = match self.destination.symlink_metadata() {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ResourceState::Missing),
            Err(e) => return Err(e),
        };

        if meta.is_symlink() {
            if self.points_to_source() {
                return Ok(ResourceState::Correct);
            }
            let existing = std::fs::read_link(&self.destination)?;
            return Ok(ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            });
        }

        if meta.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: "destination is a real directory".to_string(),
            });
        }

        Ok(ResourceState::Incorrect {
            current: "destination is a regular file".to_string(),
        })
    }

    fn plan(&self) -> Result<ResourceChange, LinkError> {
        if let Some(change) = self.preflight()? {
            return Ok(change);
        }
        if self.points_to_source() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        Ok(ResourceChange::Applied)
    }

    fn apply(&self) -> Result<ResourceChange, LinkError> {
        if let Some(change) = self.preflight()? {
            return Ok(change);
        }

        remove_existing(&self.destination).map_err(|source| LinkError::Remove {
            path: self.destination.clone(),
            source,
        })?;

        ensure_parent_dir(&self.destination)?;

        let target = self.link_target();
        create_symlink(&target, &self.destination, self.source.is_dir()).map_err(|source| {
            LinkError::Create {
                destination: self.destination.clone(),
                target,
                source,
            }
        })?;

        Ok(ResourceChange::Applied)
    }
}
