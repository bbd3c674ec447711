//! Domain records -> graph triples.

use menuseal_core_types::{MenuItem, Nutrient, SealRule};

use crate::graph::{GraphDocument, Term};
use crate::vocab;

/// Writes the definition of each rule (type, label, nutrient, thresholds)
/// unless the seal entity is already typed in `doc`.
pub fn write_rule_definitions<'a>(
    doc: &mut GraphDocument,
    rules: impl IntoIterator<Item = &'a SealRule>,
) {
    for rule in rules {
        let iri = vocab::seal_iri(&rule.id);
        if doc.has_type(&iri, vocab::NUTRITIONAL_SEAL) {
            continue;
        }
        doc.add(&iri, vocab::RDF_TYPE, Term::iri(vocab::NUTRITIONAL_SEAL));
        doc.add(&iri, vocab::SKOS_PREF_LABEL, Term::string(rule.label.clone()));
        doc.add(&iri, vocab::NUTRIENT, Term::string(rule.nutrient.as_str()));
        doc.add(&iri, vocab::THRESHOLD_SOLID, Term::float(rule.threshold_solid));
        doc.add(&iri, vocab::THRESHOLD_LIQUID, Term::float(rule.threshold_liquid));
        if let Some(unit) = &rule.unit {
            doc.add(&iri, vocab::UNIT, Term::string(unit.clone()));
        }
    }
}

/// Replaces the seal links of `subject` with links to `seal_ids`.
pub fn write_seal_links<'a>(
    doc: &mut GraphDocument,
    subject: &str,
    seal_ids: impl IntoIterator<Item = &'a str>,
) -> usize {
    doc.remove_matching(subject, vocab::HAS_NUTRITIONAL_SEAL);
    let mut linked = 0;
    for id in seal_ids {
        if doc.add(
            subject,
            vocab::HAS_NUTRITIONAL_SEAL,
            Term::iri(vocab::seal_iri(id)),
        ) {
            linked += 1;
        }
    }
    linked
}

/// Writes the attribute triples of `item` under `subject`. Seal links are
/// left to [`write_seal_links`].
pub fn write_item_attributes(doc: &mut GraphDocument, subject: &str, item: &MenuItem) {
    doc.add(subject, vocab::RDF_TYPE, Term::iri(vocab::MENU_ITEM));
    doc.add(subject, vocab::ITEM_NAME, Term::string(item.name.clone()));
    for nutrient in Nutrient::ALL {
        doc.add(
            subject,
            &vocab::nutrient_predicate(nutrient),
            Term::float(item.nutrient(nutrient)),
        );
    }
    if let Some(category) = item.category {
        doc.add(subject, vocab::CATEGORY, Term::iri(vocab::ex(category.as_str())));
    }
    doc.add(
        subject,
        vocab::HAS_PHYSICAL_STATE,
        Term::iri(vocab::state_iri(item.physical_state)),
    );
    if !item.company.is_empty() {
        doc.add(subject, vocab::COMPANY, Term::iri(vocab::company_iri(&item.company)));
    }
    if let Some(link) = &item.source_link {
        doc.add(subject, vocab::WIKI_LINK, Term::iri(link.clone()));
    }
}
