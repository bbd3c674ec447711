use std::collections::{BTreeMap, HashMap};

use menuseal_catalog_export::{materialize, ExportArtifact, ExportOptions};
use menuseal_core_types::{
    MenuItem, Nutrient, NutrientValue, PhysicalState, ReferenceProfile, ToleranceTable,
};
use menuseal_seal_engine::{classify_as, RuleTable};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::KnowledgeBaseConfig;
use crate::errors::RetrievalError;
use crate::query::{
    build_filters, is_entity_id, trailing_segment, validate_language, LabelQuery, SimilarityQuery,
};
use crate::results::BindingValue;
use crate::transport::SparqlTransport;

const FOOD_VAR: &str = "food";
const LABEL_VAR: &str = "foodLabel";

#[derive(Clone, Debug, PartialEq)]
pub struct FetchOptions {
    pub limit: usize,
    pub sample_size: usize,
    pub language: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            limit: 100,
            sample_size: 6,
            language: "en".to_string(),
        }
    }
}

/// Classified foods plus the dataset built from them.
#[derive(Clone, Debug)]
pub struct SimilarFoods {
    pub items: Vec<MenuItem>,
    pub export: ExportArtifact,
}

impl SimilarFoods {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct KnowledgeBaseClient<T> {
    transport: T,
    config: KnowledgeBaseConfig,
    tolerances: ToleranceTable,
    rules: RuleTable,
    export: ExportOptions,
    rng: Mutex<StdRng>,
}

impl<T: SparqlTransport> KnowledgeBaseClient<T> {
    pub fn new(transport: T, config: KnowledgeBaseConfig) -> Self {
        Self {
            transport,
            config,
            tolerances: ToleranceTable::default(),
            rules: RuleTable::default(),
            export: ExportOptions::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sampling, mainly for tests.
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock() = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_tolerances(mut self, tolerances: ToleranceTable) -> Self {
        self.tolerances = tolerances;
        self
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_export_options(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &KnowledgeBaseConfig {
        &self.config
    }

    /// Foods within `reference ± tolerance` on every nutrient present in
    /// `reference`, sampled down to `options.sample_size`, labelled in
    /// `options.language` and classified as solids.
    pub async fn fetch_similar(
        &self,
        reference: &ReferenceProfile,
        options: &FetchOptions,
    ) -> Result<SimilarFoods, RetrievalError> {
        // a bad tag must fail before any traffic
        validate_language(&options.language)?;
        let filters = build_filters(reference, &self.tolerances);
        let query = SimilarityQuery::new(filters, options.limit).render(&self.config)?;

        let mut rows = self.transport.select(&query).await?.into_rows();
        rows.retain(|row| row.contains_key(FOOD_VAR));
        rows.truncate(options.limit);
        info!(rows = rows.len(), limit = options.limit, "similarity query answered");
        if rows.is_empty() {
            return Ok(self.finish(Vec::new()));
        }

        let sample = self.sample(rows, options.sample_size);
        let labels = self.resolve_labels(&sample, &options.language).await?;

        let items = sample
            .iter()
            .map(|row| self.row_to_item(row, &labels))
            .collect();
        Ok(self.finish(items))
    }

    fn sample(
        &self,
        mut rows: Vec<HashMap<String, BindingValue>>,
        size: usize,
    ) -> Vec<HashMap<String, BindingValue>> {
        if rows.len() <= size {
            return rows;
        }
        let picked = {
            let mut rng = self.rng.lock();
            index::sample(&mut *rng, rows.len(), size).into_vec()
        };
        let mut slots: Vec<Option<HashMap<String, BindingValue>>> =
            rows.drain(..).map(Some).collect();
        picked
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect()
    }

    async fn resolve_labels(
        &self,
        sample: &[HashMap<String, BindingValue>],
        language: &str,
    ) -> Result<BTreeMap<String, String>, RetrievalError> {
        let mut ids = Vec::new();
        for row in sample {
            let Some(food) = row.get(FOOD_VAR) else { continue };
            let id = trailing_segment(&food.value);
            if is_entity_id(id) {
                ids.push(id.to_string());
            } else {
                warn!(food = %food.value, "entity id not usable in label query");
            }
        }
        if ids.is_empty() {
            return Ok(BTreeMap::new());
        }

        let query = LabelQuery::new(ids, language)?.render(&self.config);
        let answer = self.transport.select(&query).await?;
        let labels: BTreeMap<String, String> = answer
            .into_rows()
            .into_iter()
            .filter_map(|mut row| {
                let food = row.remove(FOOD_VAR)?;
                let label = row.remove(LABEL_VAR)?;
                Some((food.value, label.value))
            })
            .collect();
        debug!(labels = labels.len(), "label query answered");
        Ok(labels)
    }

    fn row_to_item(
        &self,
        row: &HashMap<String, BindingValue>,
        labels: &BTreeMap<String, String>,
    ) -> MenuItem {
        let food = row.get(FOOD_VAR).map(|b| b.value.as_str()).unwrap_or_default();
        let name = labels
            .get(food)
            .cloned()
            .unwrap_or_else(|| trailing_segment(food).to_string());
        let mut item = MenuItem::new(food, name).with_source_link(food);
        for (var, binding) in row {
            if var == FOOD_VAR {
                continue;
            }
            if let Some(nutrient) = Nutrient::parse(var) {
                let value = NutrientValue::parse(&binding.value);
                if value.is_malformed() {
                    debug!(food, %nutrient, raw = %binding.value, "coerced nutrient binding");
                }
                item.nutrients.set(nutrient, value.resolve());
            }
        }
        item.seals = classify_as(&item, self.rules.rules(), PhysicalState::Solid);
        item
    }

    fn finish(&self, items: Vec<MenuItem>) -> SimilarFoods {
        let export = materialize(&items, self.rules.rules(), &self.export);
        SimilarFoods { items, export }
    }
}
