//! The `check` command: report configured links that are missing or wrong.
//!
//! Nothing on disk is modified.
use std::path::Path;

use anyhow::Result;

use super::{CommandSetup, entry_name};
use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::{EntryStatus, Log, Logger};
use crate::paths::HostEnv;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Resource, ResourceState};

/// Counts produced by a check run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    /// Links already pointing at their source.
    pub correct: usize,
    /// Links that are missing or point elsewhere.
    pub pending: usize,
    /// Entries that cannot be linked as configured.
    pub invalid: usize,
}

impl CheckSummary {
    /// `true` when every entry is already linked.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.pending == 0 && self.invalid == 0
    }
}

/// Run the check command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, or if any entry is not
/// linked correctly.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    log.stage("Checking links");
    let summary = check_all(&setup.config, &setup.config_path, &setup.env, log);

    log.print_summary();

    if !summary.is_clean() {
        anyhow::bail!(
            "{} link(s) out of date, {} invalid",
            summary.pending,
            summary.invalid
        );
    }
    Ok(())
}

/// Inspect every entry of the link mapping without changing anything.
pub fn check_all(
    config: &Config,
    config_path: &Path,
    env: &HostEnv,
    log: &dyn Log,
) -> CheckSummary {
    let mut summary = CheckSummary::default();

    for (raw_source, raw_destination, entry) in config.resolve_entries(config_path, env) {
        let name = entry_name(raw_source, raw_destination);
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log.error(&format!("{name}: {e}"));
                log.record_entry(&name, EntryStatus::Failed, Some(&e.to_string()));
                summary.invalid += 1;
                continue;
            }
        };

        if entry.source == entry.destination {
            log.record_entry(
                &name,
                EntryStatus::Skipped,
                Some("source and destination are the same path"),
            );
            continue;
        }

        let resource = SymlinkResource::from_entry(&entry, config.global);
        match resource.current_state() {
            Ok(ResourceState::Correct) => {
                log.debug(&format!("ok: {name}"));
                log.record_entry(&name, EntryStatus::Ok, None);
                summary.correct += 1;
            }
            Ok(ResourceState::Missing) => {
                log.info(&format!("missing: {name}"));
                log.record_entry(&name, EntryStatus::Pending, Some("missing"));
                summary.pending += 1;
            }
            Ok(ResourceState::Incorrect { current }) => {
                log.info(&format!("wrong: {name} ({current})"));
                log.record_entry(&name, EntryStatus::Pending, Some(&current));
                summary.pending += 1;
            }
            Ok(ResourceState::Invalid { reason }) => {
                log.error(&format!("{name}: {reason}"));
                log.record_entry(&name, EntryStatus::Failed, Some(&reason));
                summary.invalid += 1;
            }
            Err(e) => {
                log.error(&format!("{name}: {e}"));
                log.record_entry(&name, EntryStatus::Failed, Some(&e.to_string()));
                summary.invalid += 1;
            }
        }
    }

    log.info(&format!(
        "{} linked, {} pending, {} invalid",
        summary.correct, summary.pending, summary.invalid
    ));
    summary
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    fn config(json: &str) -> Config {
        Config::parse(json, ConfigFormat::Json).unwrap()
    }

    #[test]
    fn reports_each_state() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in ["a", "b", "c"] {
            std::fs::write(root.join(name), name).unwrap();
        }
        std::os::unix::fs::symlink(root.join("a"), root.join("a-link")).unwrap();
        std::fs::write(root.join("b-link"), "plain file").unwrap();

        let log = Logger::new();
        let summary = check_all(
            &config(r#"{"link": {"a": "a-link", "b": "b-link", "c": "c-link", "gone": "gone-link"}}"#),
            &root.join("config.json"),
            &HostEnv::new(None, root.to_path_buf()),
            &log,
        );

        assert_eq!(
            summary,
            CheckSummary {
                correct: 1,
                pending: 2,
                invalid: 1
            }
        );
        assert!(!summary.is_clean());
        let entries = log.entries();
        assert_eq!(entries[0].status, EntryStatus::Ok);
        assert_eq!(entries[1].status, EntryStatus::Pending);
        assert_eq!(entries[2].status, EntryStatus::Pending);
        assert_eq!(entries[3].status, EntryStatus::Failed);
    }

    #[test]
    fn check_does_not_modify_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a"), "a").unwrap();

        check_all(
            &config(r#"{"link": {"a": "a-link"}}"#),
            &dir.path().join("config.json"),
            &HostEnv::new(None, dir.path().to_path_buf()),
            &Logger::new(),
        );
        assert!(dir.path().join("a-link").symlink_metadata().is_err());
    }

    #[test]
    fn unresolvable_home_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let summary = check_all(
            &config(r#"{"link": {"a": "~/a"}}"#),
            &dir.path().join("config.json"),
            &HostEnv::new(None, dir.path().to_path_buf()),
            &Logger::new(),
        );
        assert_eq!(summary.invalid, 1);
    }

    #[test]
    fn empty_mapping_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let summary = check_all(
            &config(r#"{"link": {}}"#),
            &dir.path().join("config.json"),
            &HostEnv::new(None, dir.path().to_path_buf()),
            &Logger::new(),
        );
        assert!(summary.is_clean());
    }
}
