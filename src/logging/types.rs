//! Core logging types: entry records, status, and the [`Log`] trait.

/// Per-entry result for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Human-readable entry name (usually `destination -> source`).
    pub name: String,
    /// Final status of the entry.
    pub status: EntryStatus,
    /// Optional detail message (skip reason or error description).
    pub message: Option<String>,
}

/// Status of a processed link entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Link was created or replaced.
    Ok,
    /// Link already pointed at the source; nothing changed.
    Unchanged,
    /// Entry was deliberately left alone.
    Skipped,
    /// Link is missing or wrong; `link` would change it.
    Pending,
    /// Dry run; the change was reported but not applied.
    DryRun,
    /// Entry failed; sibling entries were still processed.
    Failed,
}

/// Abstraction over logging backends.
///
/// Command code logs through this trait so tests can substitute a recorder
/// for the console-backed [`Logger`](super::logger::Logger).
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an entry result for the summary.
    fn record_entry(&self, name: &str, status: EntryStatus, message: Option<&str>);
}
