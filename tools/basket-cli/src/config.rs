//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use basket_core::CartConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["basket.toml", ".basket.toml", "basket.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where carts are stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the file-backed store. Relative paths resolve against
    /// the directory holding the config file, or the working directory when
    /// there is none.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".basket")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Generate a default basket.toml config file.
pub fn generate_default_config() -> String {
    r#"# Basket configuration

[storage]
# Directory holding the persisted cart
path = ".basket"

[cart]
# Key the cart is stored under
key = "cart:products"
# "stable" keeps items where they were first added,
# "move_to_end" moves an item to the end whenever its quantity changes
ordering = "stable"
"#
    .to_string()
}
