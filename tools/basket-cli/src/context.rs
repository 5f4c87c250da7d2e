//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use basket_core::CartStore;
use basket_kv::FileStore;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
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
            let path = resolve(&cwd, Path::new(path));
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        output.debug(&match &config_path {
            Some(path) => format!("Using config {}", path.display()),
            None => "No config file found, using defaults".to_string(),
        });

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory of the file-backed store.
    pub fn storage_root(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path());
        resolve(base, &self.config.storage.path)
    }

    /// Open the configured cart.
    pub async fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let root = self.storage_root();
        debug!(root = %root.display(), key = %self.config.cart.key, "opening cart");

        let store = FileStore::open(&root).await?;
        let carts = CartStore::open(store, self.config.cart.clone())
            .await
            .with_context(|| format!("Failed to open cart in {}", root.display()))?;
        Ok(carts)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
