use menuseal_seal_engine::{fired_rules, RuleTable};
use tracing::debug;

use crate::decode::decode_item;
use crate::encode::{write_rule_definitions, write_seal_links};
use crate::graph::GraphDocument;
use crate::vocab;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub items: usize,
    pub links: usize,
}

/// Runs the classification pass over every item in `doc`, replacing its
/// `hasNutritionalSeal` links, and makes sure the seal entities are defined.
///
/// Running it twice yields the same set of triples.
pub fn materialize_seals(doc: &mut GraphDocument, rules: &RuleTable) -> MaterializeReport {
    let mut report = MaterializeReport::default();
    let subjects: Vec<String> = doc
        .subjects_of_type(vocab::MENU_ITEM)
        .into_iter()
        .map(str::to_string)
        .collect();

    for subject in &subjects {
        let item = decode_item(doc, subject, rules);
        let ids: Vec<&str> = fired_rules(&item.nutrients, item.physical_state, rules.rules())
            .map(|rule| rule.id.as_str())
            .collect();
        report.links += write_seal_links(doc, subject, ids);
        report.items += 1;
    }

    write_rule_definitions(doc, rules.rules());
    debug!(items = report.items, links = report.links, "materialized seal links");
    report
}
