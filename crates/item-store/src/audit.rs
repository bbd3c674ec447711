use menuseal_core_types::{Nutrient, NutrientValue};
use serde::Serialize;

use crate::graph::GraphDocument;
use crate::vocab;

/// A nutrient literal that was not a plain number and got coerced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuditFinding {
    pub item: String,
    pub name: String,
    pub nutrient: Nutrient,
    pub raw: Option<String>,
    pub coerced: f64,
}

pub fn audit_nutrients(doc: &GraphDocument) -> Vec<AuditFinding> {
    let mut findings = Vec::new();
    for subject in doc.subjects_of_type(vocab::MENU_ITEM) {
        let name = doc
            .object(subject, vocab::ITEM_NAME)
            .map(|o| o.text().to_string())
            .unwrap_or_default();
        for nutrient in Nutrient::ALL {
            let predicate = vocab::nutrient_predicate(nutrient);
            let raw = doc.object(subject, &predicate).map(|o| o.text());
            let value = NutrientValue::from_literal(raw);
            if value.is_malformed() {
                findings.push(AuditFinding {
                    item: subject.to_string(),
                    name: name.clone(),
                    nutrient,
                    raw: raw.map(str::to_string),
                    coerced: value.resolve(),
                });
            }
        }
    }
    findings
}
