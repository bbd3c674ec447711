//! Builds a classified catalog from a cleaned menu CSV.

use std::io::Read;
use std::path::Path;

use menuseal_core_types::{Category, MenuItem, Nutrient, NutrientValue, PhysicalState};
use menuseal_seal_engine::{reclassify, RuleTable};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::artifact::{materialize, ExportArtifact};
use crate::errors::ExportError;
use crate::options::ExportOptions;

/// One line of the cleaned catalog CSV. Nutrient cells stay raw so they go
/// through the same coercion as dataset literals.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogRow {
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Company", default)]
    pub company: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "PhysicalState", default)]
    pub physical_state: Option<String>,
    #[serde(rename = "Calories", default)]
    pub calories: Option<String>,
    #[serde(rename = "TotalFat", default)]
    pub total_fat: Option<String>,
    #[serde(rename = "SaturatedFat", default)]
    pub saturated_fat: Option<String>,
    #[serde(rename = "TransFat", default)]
    pub trans_fat: Option<String>,
    #[serde(rename = "Cholesterol", default)]
    pub cholesterol: Option<String>,
    #[serde(rename = "Sodium", default)]
    pub sodium: Option<String>,
    #[serde(rename = "Carbs", default)]
    pub carbs: Option<String>,
    #[serde(rename = "Fiber", default)]
    pub fiber: Option<String>,
    #[serde(rename = "Sugars", default)]
    pub sugars: Option<String>,
    #[serde(rename = "Protein", default)]
    pub protein: Option<String>,
}

impl CatalogRow {
    fn raw(&self, nutrient: Nutrient) -> Option<&str> {
        let cell = match nutrient {
            Nutrient::Calories => &self.calories,
            Nutrient::TotalFat => &self.total_fat,
            Nutrient::SaturatedFat => &self.saturated_fat,
            Nutrient::TransFat => &self.trans_fat,
            Nutrient::Cholesterol => &self.cholesterol,
            Nutrient::Sodium => &self.sodium,
            Nutrient::Carbs => &self.carbs,
            Nutrient::Fiber => &self.fiber,
            Nutrient::Sugars => &self.sugars,
            Nutrient::Protein => &self.protein,
        };
        cell.as_deref()
    }

    fn into_item(self, line: u64) -> Result<MenuItem, ExportError> {
        let name = self.item.trim();
        if name.is_empty() {
            return Err(ExportError::Row {
                line,
                message: "empty Item column".to_string(),
            });
        }
        let mut item = MenuItem::new(format!("row/{line}"), name);
        if let Some(company) = self.company.as_deref() {
            item = item.with_company(company);
        }
        item.category = self
            .category
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(err) => {
                    warn!(line, error = %err, "dropping unrecognised category");
                    None
                }
            });
        item.physical_state = self
            .physical_state
            .as_deref()
            .and_then(|raw| raw.parse::<PhysicalState>().ok())
            .unwrap_or_default();
        for nutrient in Nutrient::ALL {
            let value = NutrientValue::from_literal(self.raw(nutrient));
            if value.is_malformed() {
                debug!(line, %nutrient, raw = ?self.raw(nutrient), "coerced nutrient cell");
            }
            item.nutrients.set(nutrient, value.resolve());
        }
        Ok(item)
    }
}

/// Parses catalog rows and classifies each resulting item.
pub fn read_catalog_csv<R: Read>(input: R, rules: &RuleTable) -> Result<Vec<MenuItem>, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let mut items = Vec::new();
    for (idx, record) in reader.deserialize::<CatalogRow>().enumerate() {
        // header is line 1
        let line = idx as u64 + 2;
        let mut item = record?.into_item(line)?;
        reclassify(&mut item, rules.rules());
        items.push(item);
    }
    Ok(items)
}

/// Reads `path`, classifies every row and materializes the catalog.
pub fn seed_from_csv(
    path: &Path,
    rules: &RuleTable,
    options: &ExportOptions,
) -> Result<ExportArtifact, ExportError> {
    let file = std::fs::File::open(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let items = read_catalog_csv(file, rules)?;
    Ok(materialize(&items, rules.rules(), options))
}
