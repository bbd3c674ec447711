use std::path::{Path, PathBuf};

use menuseal_core_types::{MenuItem, SealRule};
use menuseal_item_store::encode::{write_item_attributes, write_rule_definitions, write_seal_links};
use menuseal_item_store::fs::writer;
use menuseal_item_store::{vocab, GraphDocument, Term};
use tracing::{debug, info};

use crate::errors::ExportError;
use crate::options::{ExportFormat, ExportOptions};

/// Graph produced by [`materialize`], ready to be written out.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportArtifact {
    document: GraphDocument,
    items: usize,
}

impl ExportArtifact {
    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    pub fn into_document(self) -> GraphDocument {
        self.document
    }

    pub fn item_count(&self) -> usize {
        self.items
    }

    pub fn write(&self, path: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
        let written = match format {
            ExportFormat::Json => writer::write_document(path, &self.document),
            ExportFormat::Ntriples => writer::write_ntriples(path, &self.document),
        }
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %written.display(), %format, items = self.items, "catalog exported");
        Ok(written)
    }

    pub fn write_json(&self, path: &Path) -> Result<PathBuf, ExportError> {
        self.write(path, ExportFormat::Json)
    }

    pub fn write_ntriples(&self, path: &Path) -> Result<PathBuf, ExportError> {
        self.write(path, ExportFormat::Ntriples)
    }
}

/// Builds a dataset from already classified items.
///
/// Items get the IRIs `<item_base>1..n` in input order. Seal labels map back
/// to rule ids through `rules`; a label no rule carries becomes a CamelCase
/// id with its label attached. Every rule in `rules` is defined in the output
/// so re-ingesting it classifies with the same table.
pub fn materialize(items: &[MenuItem], rules: &[SealRule], options: &ExportOptions) -> ExportArtifact {
    let mut document = GraphDocument::with_default_prefixes();

    for (idx, item) in items.iter().enumerate() {
        let subject = format!("{}{}", options.item_base, idx + 1);
        let mut record = item.clone();
        record.category.get_or_insert(options.default_category);
        if record.company.is_empty() {
            record.company = options.provenance_company.clone();
        }
        write_item_attributes(&mut document, &subject, &record);

        let mut ids = Vec::with_capacity(record.seals.len());
        for label in &record.seals {
            match rules.iter().find(|rule| rule.label.eq_ignore_ascii_case(label)) {
                Some(rule) => ids.push(rule.id.clone()),
                None => {
                    let id = seal_id_for_label(label);
                    debug!(%label, %id, "seal label outside the rule table");
                    document.add(
                        &vocab::seal_iri(&id),
                        vocab::SKOS_PREF_LABEL,
                        Term::string(label.clone()),
                    );
                    ids.push(id);
                }
            }
        }
        write_seal_links(&mut document, &subject, ids.iter().map(String::as_str));
    }

    write_rule_definitions(&mut document, rules);
    ExportArtifact {
        document,
        items: items.len(),
    }
}

/// `"High in Trans Fat"` -> `"HighInTransFat"`.
pub fn seal_id_for_label(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuseal_core_types::{Category, Nutrient, PhysicalState};
    use menuseal_seal_engine::{default_rules, reclassify};

    fn burger() -> MenuItem {
        let mut item = MenuItem::new("http://kb/entity/Q1", "Cheeseburger")
            .with_nutrient(Nutrient::Calories, 300.0)
            .with_nutrient(Nutrient::Sodium, 50.0)
            .with_source_link("http://kb/entity/Q1");
        reclassify(&mut item, &default_rules());
        item
    }

    #[test]
    fn assigns_sequential_ids_and_defaults() {
        let rules = default_rules();
        let salad = MenuItem::new("x", "Salad")
            .with_company("Green Bowl")
            .with_category(Category::Salad)
            .with_state(PhysicalState::Solid);
        let artifact = materialize(&[burger(), salad], &rules, &ExportOptions::default());
        let doc = artifact.document();

        let first = vocab::ex("item/1");
        let second = vocab::ex("item/2");
        assert_eq!(doc.subjects_of_type(vocab::MENU_ITEM), vec![first.as_str(), second.as_str()]);
        assert_eq!(
            doc.object(&first, vocab::CATEGORY).unwrap().text(),
            vocab::ex("Sandwich")
        );
        assert_eq!(
            doc.object(&first, vocab::COMPANY).unwrap().text(),
            "http://dbpedia.org/resource/FOOD_LION"
        );
        assert_eq!(
            doc.object(&second, vocab::COMPANY).unwrap().text(),
            "http://dbpedia.org/resource/Green_Bowl"
        );
        assert_eq!(
            doc.object(&first, vocab::WIKI_LINK).unwrap().text(),
            "http://kb/entity/Q1"
        );
        let seals: Vec<&str> = doc
            .objects(&first, vocab::HAS_NUTRITIONAL_SEAL)
            .map(|o| o.text())
            .collect();
        assert_eq!(seals, vec![vocab::ex("HighCalories").as_str()]);
        assert!(doc.has_type(&vocab::ex("HighSodium"), vocab::NUTRITIONAL_SEAL));
    }

    #[test]
    fn unknown_labels_become_camel_case_ids() {
        let mut item = burger();
        item.seals.insert("contains trans-fat".to_string());
        let artifact = materialize(&[item], &default_rules(), &ExportOptions::default());
        let seal = vocab::ex("ContainsTransFat");
        assert_eq!(
            artifact
                .document()
                .object(&seal, vocab::SKOS_PREF_LABEL)
                .unwrap()
                .text(),
            "contains trans-fat"
        );
    }

    #[test]
    fn camel_case_ids() {
        assert_eq!(seal_id_for_label("High in Sodium"), "HighInSodium");
        assert_eq!(seal_id_for_label("  low_fat "), "LowFat");
    }
}
