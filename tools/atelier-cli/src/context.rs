//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use atelier_cache::KeyValueStore;
use atelier_commerce::cart::{CachePersistence, CartStore};
use atelier_commerce::config::{CartConfig, StorageConfig};

use crate::output::Output;

/// Config file names searched from the working directory upwards.
const CONFIG_NAMES: [&str; 3] = ["atelier.toml", ".atelier.toml", "atelier.json"];

/// Cart store type the commands work against.
pub type CliStore = CartStore<CachePersistence<Box<dyn KeyValueStore>>>;

/// Execution context for CLI commands.
pub struct Context {
    /// Cart configuration.
    pub config: CartConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    ///
    /// Without a config file the cart is kept under `.atelier/cart` in the
    /// working directory.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = match config_path {
            Some(path) => CartConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path))?,
            None => Self::find_config(&cwd).unwrap_or_else(|| CartConfig {
                storage: StorageConfig::File {
                    dir: default_cart_dir(&cwd),
                },
                ..CartConfig::default()
            }),
        };

        if let StorageConfig::File { dir } = &mut config.storage {
            *dir = resolve_path(&cwd, dir);
        }

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CartConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CartConfig::load(&config_path) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the configured cart.
    pub fn open_store(&self) -> Result<CliStore> {
        if self.config.storage == StorageConfig::Memory {
            self.output
                .warn("storage backend is 'memory'; changes will not be kept");
        }
        self.output.debug(&format!(
            "opening cart '{}' ({:?})",
            self.config.namespace, self.config.storage
        ));
        self.config
            .open_store()
            .context("Failed to open cart storage")
    }
}

/// Default cart directory under `cwd`.
pub fn default_cart_dir(cwd: &Path) -> PathBuf {
    cwd.join(".atelier").join("cart")
}

/// Resolve a path relative to `base`.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
