//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::Storefront;
use storefront_kv::Store;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match find_config(&cwd, &output) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let output = output.with_currency(config.currency());
        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory holding the state files.
    pub fn store_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.store.path)
    }

    /// Open the store and hydrate a session from it.
    pub fn open_storefront(&self) -> Result<Storefront> {
        let dir = self.store_dir();
        self.output.debug(&format!("Store: {}", dir.display()));
        let store = Store::open(&dir)
            .with_context(|| format!("Failed to open store at {}", dir.display()))?;
        Ok(Storefront::open(store))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or any parent directory.
///
/// Runs before tracing is installed, so unreadable files are reported
/// through `output`.
fn find_config(start: &Path, output: &Output) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CliConfig::load(config_path.to_str()?) {
                    Ok(config) => return Some((config, config_path)),
                    Err(error) => output.warn(&format!(
                        "Ignoring unreadable config {}: {:#}",
                        config_path.display(),
                        error
                    )),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}
