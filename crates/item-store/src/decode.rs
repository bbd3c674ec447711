//! Graph document -> domain records.

use std::collections::BTreeSet;

use menuseal_core_types::{
    company_token, Category, MenuItem, Nutrient, NutrientValue, PhysicalState, SealRule,
};
use menuseal_seal_engine::RuleTable;
use tracing::{debug, warn};

use crate::graph::GraphDocument;
use crate::vocab;

/// Seal rules defined in the dataset itself, in declaration order.
///
/// Entities with a missing or unsupported nutrient are skipped with a warning.
pub fn dataset_rules(doc: &GraphDocument) -> Vec<SealRule> {
    let mut rules = Vec::new();
    for subject in doc.subjects_of_type(vocab::NUTRITIONAL_SEAL) {
        let Some(nutrient) = doc
            .object(subject, vocab::NUTRIENT)
            .and_then(|o| Nutrient::parse(vocab::local_name(o.text())))
        else {
            warn!(seal = subject, "seal entity without a usable nutrient; skipping");
            continue;
        };
        if !nutrient.is_rule_bearing() {
            warn!(seal = subject, %nutrient, "seal entity targets a non rule-bearing nutrient");
            continue;
        }
        let label = doc
            .object(subject, vocab::SKOS_PREF_LABEL)
            .map(|o| o.text().to_string())
            .unwrap_or_else(|| vocab::local_name(subject).to_string());
        let threshold = |predicate: &str| {
            NutrientValue::from_literal(doc.object(subject, predicate).map(|o| o.text())).resolve()
        };
        rules.push(SealRule {
            id: vocab::seal_id(subject),
            label,
            nutrient,
            threshold_solid: threshold(vocab::THRESHOLD_SOLID),
            threshold_liquid: threshold(vocab::THRESHOLD_LIQUID),
            unit: doc.object(subject, vocab::UNIT).map(|o| o.text().to_string()),
        });
    }
    rules
}

/// Rules declared by the dataset when it has any, otherwise `fallback`.
pub fn effective_rules(doc: &GraphDocument, fallback: &RuleTable) -> RuleTable {
    let declared = dataset_rules(doc);
    if declared.is_empty() {
        return fallback.clone();
    }
    match RuleTable::new(declared) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "dataset seal rules invalid; using configured table");
            fallback.clone()
        }
    }
}

/// Decodes every `ex:MenuItem` subject.
///
/// Seal labels come from the seal entity's `skos:prefLabel`, then from the
/// rule table, then from the seal IRI's local name.
pub fn decode_items(doc: &GraphDocument, rules: &RuleTable) -> Vec<MenuItem> {
    doc.subjects_of_type(vocab::MENU_ITEM)
        .into_iter()
        .map(|subject| decode_item(doc, subject, rules))
        .collect()
}

pub fn decode_item(doc: &GraphDocument, subject: &str, rules: &RuleTable) -> MenuItem {
    let name = match doc.object(subject, vocab::ITEM_NAME) {
        Some(term) => term.text().to_string(),
        None => {
            debug!(item = subject, "item without itemName; using local name");
            vocab::local_name(subject).replace('_', " ")
        }
    };
    let mut item = MenuItem::new(subject, name);

    if let Some(company) = doc.object(subject, vocab::COMPANY) {
        item.company = company_token(company.text());
    }
    item.category = doc
        .object(subject, vocab::CATEGORY)
        .and_then(|o| o.text().parse::<Category>().ok());
    item.physical_state = doc
        .object(subject, vocab::HAS_PHYSICAL_STATE)
        .and_then(|o| o.text().parse::<PhysicalState>().ok())
        .unwrap_or_default();

    for nutrient in Nutrient::ALL {
        let predicate = vocab::nutrient_predicate(nutrient);
        let raw = doc.object(subject, &predicate).map(|o| o.text());
        item.nutrients
            .set(nutrient, NutrientValue::from_literal(raw).resolve());
    }

    item.seals = seal_labels(doc, subject, rules);
    item.source_link = doc
        .object(subject, vocab::WIKI_LINK)
        .map(|o| o.text().to_string());
    item
}

fn seal_labels(doc: &GraphDocument, subject: &str, rules: &RuleTable) -> BTreeSet<String> {
    doc.objects(subject, vocab::HAS_NUTRITIONAL_SEAL)
        .filter_map(|o| o.as_iri())
        .map(|seal| {
            if let Some(label) = doc.object(seal, vocab::SKOS_PREF_LABEL) {
                return label.text().to_string();
            }
            let id = vocab::seal_id(seal);
            rules
                .by_id(&id)
                .map(|rule| rule.label.clone())
                .unwrap_or_else(|| vocab::local_name(seal).to_string())
        })
        .collect()
}
