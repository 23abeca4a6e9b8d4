// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed config tree and a fluent builder so
// each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotlink::cli::GlobalOpts;
use dotlink::config::Config;
use dotlink::paths::HostEnv;

/// An isolated config tree backed by a [`tempfile::TempDir`].
///
/// Layout:
/// - `dotfiles/`              the directory holding the config file
/// - `dotfiles/config.json`   the link mapping (name configurable)
/// - `home/`                  stands in for the user's home directory
pub struct IntegrationTestContext {
    /// Temporary directory holding everything.
    pub root: tempfile::TempDir,
    /// Config file path.
    pub config_path: PathBuf,
}

impl IntegrationTestContext {
    /// Directory that holds the config file and link sources.
    pub fn dotfiles(&self) -> PathBuf {
        self.root.path().join("dotfiles")
    }

    /// Fake home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Environment with the fake home and the temp root as working directory.
    pub fn env(&self) -> HostEnv {
        HostEnv::new(Some(self.home()), self.root.path().to_path_buf())
    }

    /// Environment with no home directory.
    pub fn env_without_home(&self) -> HostEnv {
        HostEnv::new(None, self.root.path().to_path_buf())
    }

    /// Command-line options pointing at this context's config file.
    pub fn global_opts(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            config: self.config_path.clone(),
            dry_run,
        }
    }

    /// Load the config file.
    pub fn load_config(&self) -> Config {
        Config::load(&self.config_path).expect("load config")
    }

    /// Read the target of the symlink at `path`.
    pub fn link_target(&self, path: &Path) -> PathBuf {
        std::fs::read_link(path).expect("read link")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a context with an empty `config.json`.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("dotfiles")).expect("create dotfiles dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        let config_path = root.path().join("dotfiles").join("config.json");
        std::fs::write(&config_path, r#"{"link": {}}"#).expect("write config");
        Self {
            ctx: IntegrationTestContext { root, config_path },
        }
    }

    /// Write `content` as the config file, named `filename` inside
    /// `dotfiles/`.
    pub fn with_config(mut self, filename: &str, content: &str) -> Self {
        let path = self.ctx.dotfiles().join(filename);
        std::fs::write(&path, content).expect("write config file");
        self.ctx.config_path = path;
        self
    }

    /// Create a source file under `dotfiles/`.
    pub fn with_source(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.dotfiles().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Create a source directory under `dotfiles/`.
    pub fn with_source_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.ctx.dotfiles().join(relative)).expect("create source dir");
        self
    }

    /// Create a file inside the fake home directory.
    pub fn with_home_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.home().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home file parent");
        }
        std::fs::write(&path, content).expect("write home file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
