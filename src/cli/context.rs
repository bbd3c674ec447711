use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use menuseal_item_store::ItemStore;
use menuseal_seal_engine::{load_rules, RuleTable};
use once_cell::sync::OnceCell;

use crate::config::Config;

pub struct CliContext {
    config: Config,
    config_path: PathBuf,
    store: OnceCell<ItemStore>,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            store: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Configured rule table: built-in defaults, the optional rules file,
    /// then `MENUSEAL_SEAL_*` environment overrides.
    pub fn rules(&self) -> Result<RuleTable> {
        load_rules(self.config.seals.rules_path.as_deref()).context("loading seal rules")
    }

    /// The item store, initialized on first use.
    pub fn store(&self) -> Result<&ItemStore> {
        self.store.get_or_try_init(|| {
            let store = ItemStore::new(self.config.store_config(), self.rules()?);
            store.initialize().context("loading catalog")?;
            Ok(store)
        })
    }
}
