//! Top-level subcommand orchestration.
pub mod check;
pub mod link;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Log;
use crate::paths::HostEnv;

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Path of the config file, as given on the command line.
    pub config_path: PathBuf,
    /// Loaded configuration.
    pub config: Config,
    /// Home and working directory captured at startup.
    pub env: HostEnv,
}

impl CommandSetup {
    /// Capture the environment, load the config file, and report any
    /// validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined or the
    /// config file cannot be loaded.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let env = HostEnv::detect().context("cannot determine working directory")?;
        Self::init_with_env(global, env, log)
    }

    /// Like [`init`](Self::init), with an explicit environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn init_with_env(global: &GlobalOpts, env: HostEnv, log: &dyn Log) -> Result<Self> {
        let config_path = global.config.clone();

        log.stage("Loading configuration");
        let config = Config::load(&config_path)?;
        log.info(&format!(
            "loaded {} links from {}",
            config.len(),
            config_path.display()
        ));
        log.debug(&format!(
            "replace: {}, relative: {}",
            config.global.replace, config.global.relative
        ));
        if env.home.is_none() {
            log.debug("home directory not found; '~' entries will fail");
        }

        let warnings = config.validate(&config_path, &env);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!("  [{}]: {}", warning.item, warning.message));
            }
        }

        Ok(Self {
            config_path,
            config,
            env,
        })
    }
}

/// Load and validate the config without acting on it.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded.
pub fn load_only(global: &GlobalOpts, log: &dyn Log) -> Result<()> {
    CommandSetup::init(global, log)?;
    log.info("no command given; nothing to do (try `dotlink link`)");
    Ok(())
}

/// Display name for an entry: `destination -> source`, as written in the
/// config.
pub(crate) fn entry_name(raw_source: &str, raw_destination: &str) -> String {
    format!("{raw_destination} -> {raw_source}")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::Logger;

    fn opts(config: PathBuf) -> GlobalOpts {
        GlobalOpts {
            config,
            dry_run: false,
        }
    }

    #[test]
    fn init_loads_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"link": {"a": "b", "c": "d"}}"#).unwrap();

        let env = HostEnv::new(None, dir.path().to_path_buf());
        let setup = CommandSetup::init_with_env(&opts(path.clone()), env, &Logger::new()).unwrap();
        assert_eq!(setup.config.len(), 2);
        assert_eq!(setup.config_path, path);
    }

    #[test]
    fn init_fails_on_missing_link() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"global": {"replace": true, "relative": false}}"#).unwrap();

        let env = HostEnv::new(None, dir.path().to_path_buf());
        let err = CommandSetup::init_with_env(&opts(path), env, &Logger::new()).unwrap_err();
        assert!(err.to_string().contains("cannot parse config file"));
    }

    #[test]
    fn load_only_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"link": {"a.txt": "b.txt"}}"#).unwrap();

        load_only(&opts(path), &Logger::new()).unwrap();
        assert!(dir.path().join("b.txt").symlink_metadata().is_err());
    }

    #[test]
    fn entry_name_reads_destination_first() {
        assert_eq!(entry_name("a.txt", "~/b.txt"), "~/b.txt -> a.txt");
    }
}
