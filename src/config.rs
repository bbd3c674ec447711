//! Runtime configuration for the `menuseal` binary.
//!
//! Every field has a default, so an empty YAML file (or none at all) is a
//! valid configuration.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};
use menuseal_catalog_export::ExportOptions;
use menuseal_core_types::{Nutrient, ToleranceTable};
use menuseal_item_store::StoreConfig;
use menuseal_kb_retrieval::KnowledgeBaseConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const ENV_KB_ENDPOINT: &str = "MENUSEAL_KB_ENDPOINT";
pub const ENV_CACHE_PATH: &str = "MENUSEAL_CACHE_PATH";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogSection,
    pub seals: SealsSection,
    pub knowledge_base: KnowledgeBaseConfig,
    /// Per-nutrient overrides on top of the built-in tolerance windows.
    pub tolerances: BTreeMap<Nutrient, f64>,
    pub export: ExportOptions,
    pub recommend: RecommendSection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub sources: Vec<PathBuf>,
    pub cache_path: Option<PathBuf>,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            sources: vec![PathBuf::from("data/menu.json")],
            cache_path: Some(PathBuf::from("data/menu_with_seals.json")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealsSection {
    /// YAML rule table replacing the built-in seal rules.
    pub rules_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendSection {
    pub k: usize,
}

impl Default for RecommendSection {
    fn default() -> Self {
        Self {
            k: menuseal_recommender::DEFAULT_K,
        }
    }
}

impl Config {
    /// Environment variables win over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = env::var(ENV_KB_ENDPOINT) {
            if !endpoint.trim().is_empty() {
                info!(%endpoint, "knowledge base endpoint from {}", ENV_KB_ENDPOINT);
                self.knowledge_base.endpoint = endpoint.trim().to_string();
            }
        }
        if let Ok(path) = env::var(ENV_CACHE_PATH) {
            let path = path.trim();
            self.catalog.cache_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            sources: self.catalog.sources.clone(),
            cache_path: self.catalog.cache_path.clone(),
        }
    }

    pub fn tolerance_table(&self) -> ToleranceTable {
        ToleranceTable::default().merged(&self.tolerances)
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog.sources.is_empty() {
            bail!("catalog.sources must list at least one dataset");
        }
        if self.recommend.k == 0 {
            bail!("recommend.k must be positive");
        }
        if self.knowledge_base.endpoint.trim().is_empty() {
            bail!("knowledge_base.endpoint must not be empty");
        }
        for (nutrient, tolerance) in &self.tolerances {
            if !tolerance.is_finite() || *tolerance < 0.0 {
                bail!("tolerance for {nutrient} must be a non-negative number");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn empty_yaml_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.knowledge_base.properties[&Nutrient::Sodium], "P18");
    }

    #[test]
    fn tolerance_overrides_accept_aliases() {
        let config: Config = serde_yaml::from_str(
            "tolerances:\n  fatsaturated: 1.0\n  calories: 25\n",
        )
        .unwrap();
        let table = config.tolerance_table();
        assert_eq!(table.tolerance(Nutrient::SaturatedFat), 1.0);
        assert_eq!(table.tolerance(Nutrient::Calories), 25.0);
        assert_eq!(table.tolerance(Nutrient::Sodium), 100.0);
    }

    #[test]
    fn rejects_empty_sources() {
        let config: Config = serde_yaml::from_str("catalog:\n  sources: []\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn env_overrides_endpoint_and_cache() {
        env::set_var(ENV_KB_ENDPOINT, "http://localhost:9999/sparql");
        env::set_var(ENV_CACHE_PATH, "");
        let mut config = Config::default();
        config.apply_env_overrides();
        env::remove_var(ENV_KB_ENDPOINT);
        env::remove_var(ENV_CACHE_PATH);

        assert_eq!(config.knowledge_base.endpoint, "http://localhost:9999/sparql");
        assert!(config.catalog.cache_path.is_none());
    }
}
