//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rocket_cache::FileStore;
use rocket_commerce::{CartStore, CollectingNotifier, HttpCatalogApi};
use rocket_data::FetchClient;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Cart store as wired by the CLI.
pub type CliCartStore = CartStore<HttpCatalogApi, FileStore, Arc<CollectingNotifier>>;

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
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the persisted cart with a notifier the caller can drain.
    pub fn open_store(&self) -> Result<(CliCartStore, Arc<CollectingNotifier>)> {
        let storage_path = self.resolve_path(&self.config.storage.path);
        self.output
            .debug(&format!("Cart storage: {}", storage_path.display()));
        let storage = FileStore::open(&storage_path)
            .with_context(|| format!("Failed to open cart storage: {}", storage_path.display()))?;

        let mut client = FetchClient::new().with_base_url(self.config.api.base_url.clone());
        if let Some(timeout) = self.config.api.timeout() {
            client = client.with_timeout(timeout);
        }
        self.output
            .debug(&format!("Storefront API: {}", self.config.api.base_url));

        let notifier = Arc::new(CollectingNotifier::new());
        let store = CartStore::with_storage_key(
            HttpCatalogApi::new(client),
            storage,
            Arc::clone(&notifier),
            self.config.storage.key.clone(),
        );
        Ok((store, notifier))
    }
}
