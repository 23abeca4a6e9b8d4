//! Structured logger with dry-run awareness and summary collection.
use std::sync::Mutex;

use super::types::{EntryRecord, EntryStatus, Log};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Console logger backed by [`tracing`] that also collects per-entry results
/// for the run summary.
///
/// Output formatting is handled by the subscriber installed with
/// [`init_subscriber`](super::subscriber::init_subscriber); without one, the
/// events are dropped and only the recorded entries remain.
#[derive(Debug, Default)]
pub struct Logger {
    entries: Mutex<Vec<EntryRecord>>,
}

impl Logger {
    /// Create a new logger with no recorded entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "dotlink::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "dotlink::dry_run", "{msg}");
    }

    /// Record an entry result for the summary.
    pub fn record_entry(&self, name: &str, status: EntryStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(EntryRecord {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return a copy of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<EntryRecord> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log the summary of all recorded entries.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut unchanged = 0u32;
        let mut skipped = 0u32;
        let mut pending = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                EntryStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                EntryStatus::Unchanged => {
                    unchanged += 1;
                    ("·", "\x1b[2m")
                }
                EntryStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                EntryStatus::Pending => {
                    pending += 1;
                    ("!", "\x1b[33m")
                }
                EntryStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                EntryStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        let total = ok + unchanged + skipped + pending + dry_run + failed;
        let mut line = format!(
            "{total} links: \x1b[32m{ok} ok\x1b[0m, \x1b[2m{unchanged} unchanged\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m"
        );
        if pending > 0 {
            line.push_str(&format!(", \x1b[33m{pending} pending\x1b[0m"));
        }
        if dry_run > 0 {
            line.push_str(&format!(", \x1b[37m{dry_run} dry-run\x1b[0m"));
        }
        line.push_str(&format!(", \x1b[31m{failed} failed\x1b[0m"));
        self.info(&line);
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_entry(&self, name: &str, status: EntryStatus, message: Option<&str>) {
        self.record_entry(name, status, message);
    }
}
