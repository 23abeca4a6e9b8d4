//! Non-fatal checks over a loaded link mapping.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::Config;
use crate::paths::HostEnv;

/// A validation warning detected after loading the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Raw source key of the offending entry.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for the entry keyed by `item`.
    #[must_use]
    pub fn new(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
        }
    }
}

impl Config {
    /// Check the link mapping for problems that would make entries fail or
    /// clobber each other.
    ///
    /// Reports unresolvable entries, missing sources, entries that link a
    /// path onto itself, and destinations claimed by more than one source.
    #[must_use]
    pub fn validate(&self, config_path: &Path, env: &HostEnv) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut claimed: BTreeMap<PathBuf, &str> = BTreeMap::new();

        for (item, _, entry) in self.resolve_entries(config_path, env) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warnings.push(ValidationWarning::new(item, e.to_string()));
                    continue;
                }
            };

            if entry.source.symlink_metadata().is_err() {
                warnings.push(ValidationWarning::new(
                    item,
                    format!("source does not exist: {}", entry.source.display()),
                ));
            }

            if entry.source == entry.destination {
                warnings.push(ValidationWarning::new(
                    item,
                    format!(
                        "source and destination are the same path: {}",
                        entry.source.display()
                    ),
                ));
            }

            if let Some(previous) = claimed.insert(entry.destination.clone(), item) {
                warnings.push(ValidationWarning::new(
                    item,
                    format!(
                        "destination {} is also the destination of '{previous}'",
                        entry.destination.display()
                    ),
                ));
            }
        }

        warnings
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    fn setup(link: &str) -> (tempfile::TempDir, PathBuf, Config) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config =
            Config::parse(&format!(r#"{{"link": {link}}}"#), ConfigFormat::Json).unwrap();
        (dir, path, config)
    }

    fn env() -> HostEnv {
        HostEnv::new(Some(PathBuf::from("/home/u")), PathBuf::from("/"))
    }

    #[test]
    fn valid_mapping_has_no_warnings() {
        let (dir, path, config) = setup(r#"{"a.txt": "b.txt"}"#);
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        assert!(config.validate(&path, &env()).is_empty());
    }

    #[test]
    fn missing_source_warns() {
        let (_dir, path, config) = setup(r#"{"a.txt": "b.txt"}"#);
        let warnings = config.validate(&path, &env());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, "a.txt");
        assert!(warnings[0].message.contains("source does not exist"));
    }

    #[test]
    fn shared_destination_warns() {
        let (dir, path, config) = setup(r#"{"a.txt": "out.txt", "b.txt": "./out.txt"}"#);
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        let warnings = config.validate(&path, &env());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, "b.txt");
        assert!(warnings[0].message.contains("'a.txt'"));
    }

    #[test]
    fn self_link_warns() {
        let (dir, path, config) = setup(r#"{"a.txt": "./a.txt"}"#);
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        let warnings = config.validate(&path, &env());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("same path"));
    }

    #[test]
    fn unresolvable_entry_warns() {
        let (_dir, path, config) = setup(r#"{"a.txt": "~/a"}"#);
        let warnings = config.validate(&path, &HostEnv::new(None, PathBuf::from("/")));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("home directory"));
    }
}
