use std::collections::BTreeMap;
use std::time::Duration;

use menuseal_core_types::Nutrient;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://wikifcd.wikibase.cloud/query/sparql";
pub const DEFAULT_SITE: &str = "https://wikifcd.wikibase.cloud";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    pub endpoint: String,
    /// Base IRI of the wikibase; entity, property and statement prefixes
    /// are derived from it.
    pub site: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Property id holding each nutrient's value.
    pub properties: BTreeMap<Nutrient, String>,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            site: DEFAULT_SITE.to_string(),
            timeout_secs: 30,
            user_agent: concat!("menuseal/", env!("CARGO_PKG_VERSION")).to_string(),
            properties: default_properties(),
        }
    }
}

impl KnowledgeBaseConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn entity_prefix(&self) -> String {
        format!("{}/entity/", self.site.trim_end_matches('/'))
    }

    pub fn property_prefix(&self) -> String {
        format!("{}/prop/", self.site.trim_end_matches('/'))
    }

    pub fn statement_prefix(&self) -> String {
        format!("{}/prop/statement/", self.site.trim_end_matches('/'))
    }
}

pub fn default_properties() -> BTreeMap<Nutrient, String> {
    [
        (Nutrient::Sodium, "P18"),
        (Nutrient::Sugars, "P104"),
        (Nutrient::Calories, "P6"),
        (Nutrient::SaturatedFat, "P86"),
        (Nutrient::TotalFat, "P8"),
        (Nutrient::Cholesterol, "P99"),
        (Nutrient::TransFat, "P271"),
        (Nutrient::Protein, "P7"),
        (Nutrient::Fiber, "P11"),
        (Nutrient::Carbs, "P89"),
    ]
    .into_iter()
    .map(|(nutrient, pid)| (nutrient, pid.to_string()))
    .collect()
}
