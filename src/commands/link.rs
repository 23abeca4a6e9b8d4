//! The `link` command: create every configured symlink.
//!
//! Entries are processed one at a time in sorted source order.  Each entry
//! goes through resolve, source check, removal of the existing destination,
//! and link creation; a failure at any step is recorded against that entry
//! and the remaining entries are still processed.
use std::path::Path;

use anyhow::Result;

use super::{CommandSetup, entry_name};
use crate::cli::GlobalOpts;
use crate::config::{Config, GlobalOptions, LinkEntry};
use crate::error::{LinkError, ResolveError};
use crate::logging::{EntryStatus, Log, Logger};
use crate::paths::HostEnv;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Resource, ResourceChange};

/// What happened to a single entry.
#[derive(Debug)]
pub enum EntryOutcome {
    /// The link was created (replacing whatever was there).
    Linked,
    /// The link already pointed at the source.
    Unchanged,
    /// The entry was left alone.
    Skipped {
        /// Reason the entry was skipped.
        reason: String,
    },
    /// Dry run: the link would have been created.
    DryRun,
    /// The entry failed.
    Failed(LinkError),
}

/// Result of one entry of the mapping.
#[derive(Debug)]
pub struct EntryReport {
    /// Source as written in the config.
    pub raw_source: String,
    /// Destination as written in the config.
    pub raw_destination: String,
    /// What happened.
    pub outcome: EntryOutcome,
}

/// Aggregate of every entry processed in one run.
#[derive(Debug, Default)]
pub struct LinkReport {
    /// Per-entry results, in processing order.
    pub entries: Vec<EntryReport>,
}

impl LinkReport {
    /// Number of entries that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, EntryOutcome::Failed(_)))
            .count()
    }

    /// `true` when no entry failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Run the link command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, or after processing all
/// entries if any of them failed.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    log.stage(if global.dry_run {
        "Linking (dry run)"
    } else {
        "Linking"
    });
    let report = link_all(
        &setup.config,
        &setup.config_path,
        &setup.env,
        global.dry_run,
        log,
    );

    log.print_summary();

    let count = report.failure_count();
    if count > 0 {
        anyhow::bail!("{count} link(s) failed");
    }
    Ok(())
}

/// Process every entry of the link mapping on a best-effort basis.
pub fn link_all(
    config: &Config,
    config_path: &Path,
    env: &HostEnv,
    dry_run: bool,
    log: &dyn Log,
) -> LinkReport {
    let mut report = LinkReport::default();

    for (raw_source, raw_destination, entry) in config.resolve_entries(config_path, env) {
        let outcome = link_entry(entry, config.global, dry_run, log);
        report_outcome(raw_source, raw_destination, &outcome, log);
        report.entries.push(EntryReport {
            raw_source: raw_source.to_string(),
            raw_destination: raw_destination.to_string(),
            outcome,
        });
    }

    let mut linked = 0u32;
    let mut unchanged = 0u32;
    let mut skipped = 0u32;
    for entry in &report.entries {
        match entry.outcome {
            EntryOutcome::Linked | EntryOutcome::DryRun => linked += 1,
            EntryOutcome::Unchanged => unchanged += 1,
            EntryOutcome::Skipped { .. } => skipped += 1,
            EntryOutcome::Failed(_) => {}
        }
    }
    let failed = report.failure_count();
    if dry_run {
        log.info(&format!(
            "{linked} would change, {unchanged} already ok, {skipped} skipped, {failed} failed"
        ));
    } else {
        log.info(&format!(
            "{linked} linked, {unchanged} already ok, {skipped} skipped, {failed} failed"
        ));
    }

    report
}

/// Drive one resolved entry through the symlink resource.
fn link_entry(
    entry: Result<LinkEntry, ResolveError>,
    options: GlobalOptions,
    dry_run: bool,
    log: &dyn Log,
) -> EntryOutcome {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => return EntryOutcome::Failed(e.into()),
    };

    let resource = SymlinkResource::from_entry(&entry, options);
    log.debug(&format!("resolved {}", resource.description()));

    let result = if dry_run {
        resource.plan()
    } else {
        resource.apply()
    };

    match result {
        Ok(ResourceChange::Applied) if dry_run => EntryOutcome::DryRun,
        Ok(ResourceChange::Applied) => EntryOutcome::Linked,
        Ok(ResourceChange::AlreadyCorrect) => EntryOutcome::Unchanged,
        Ok(ResourceChange::Skipped { reason }) => EntryOutcome::Skipped { reason },
        Err(e) => EntryOutcome::Failed(e),
    }
}

/// Log an entry's outcome and record it for the summary.
fn report_outcome(raw_source: &str, raw_destination: &str, outcome: &EntryOutcome, log: &dyn Log) {
    let name = entry_name(raw_source, raw_destination);
    match outcome {
        EntryOutcome::Linked => {
            log.debug(&format!("linked {name}"));
            log.record_entry(&name, EntryStatus::Ok, None);
        }
        EntryOutcome::Unchanged => {
            log.debug(&format!("ok: {name} (already linked)"));
            log.record_entry(&name, EntryStatus::Unchanged, None);
        }
        EntryOutcome::Skipped { reason } => {
            log.info(&format!("skipped {name}: {reason}"));
            log.record_entry(&name, EntryStatus::Skipped, Some(reason));
        }
        EntryOutcome::DryRun => {
            log.dry_run(&format!("would link {name}"));
            log.record_entry(&name, EntryStatus::DryRun, None);
        }
        EntryOutcome::Failed(e) => {
            let message = e.to_string();
            if e.is_not_found() {
                log.error(&message);
            } else {
                log.error(&format!("{name}: {message}"));
            }
            log.record_entry(&name, EntryStatus::Failed, Some(&message));
        }
    }
}
