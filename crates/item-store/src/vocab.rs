//! IRIs of the menu vocabulary.

use menuseal_core_types::{Nutrient, PhysicalState};

pub const EX: &str = "http://example.com/menu#";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

pub const MENU_ITEM: &str = "http://example.com/menu#MenuItem";
pub const NUTRITIONAL_SEAL: &str = "http://example.com/menu#NutritionalSeal";
pub const ITEM_NAME: &str = "http://example.com/menu#itemName";
pub const COMPANY: &str = "http://example.com/menu#company";
pub const CATEGORY: &str = "http://example.com/menu#category";
pub const HAS_PHYSICAL_STATE: &str = "http://example.com/menu#hasPhysicalState";
pub const HAS_NUTRITIONAL_SEAL: &str = "http://example.com/menu#hasNutritionalSeal";
pub const WIKI_LINK: &str = "http://example.com/menu#wikiLink";
pub const NUTRIENT: &str = "http://example.com/menu#nutrient";
pub const THRESHOLD_SOLID: &str = "http://example.com/menu#thresholdSolid";
pub const THRESHOLD_LIQUID: &str = "http://example.com/menu#thresholdLiquid";
pub const UNIT: &str = "http://example.com/menu#unit";

pub const DBPEDIA_RESOURCE: &str = "http://dbpedia.org/resource/";

/// `ex:<local>`
pub fn ex(local: &str) -> String {
    format!("{EX}{local}")
}

pub fn nutrient_predicate(nutrient: Nutrient) -> String {
    ex(nutrient.as_str())
}

pub fn state_iri(state: PhysicalState) -> String {
    ex(state.as_str())
}

/// Seal ids that are already absolute IRIs are kept as-is.
pub fn seal_iri(id: &str) -> String {
    if id.contains("://") {
        id.to_string()
    } else {
        ex(id)
    }
}

/// Inverse of [`seal_iri`] for ids living in the `ex:` namespace.
pub fn seal_id(iri: &str) -> String {
    iri.strip_prefix(EX).unwrap_or(iri).to_string()
}

pub fn company_iri(token: &str) -> String {
    if token.contains("://") {
        token.to_string()
    } else {
        format!("{DBPEDIA_RESOURCE}{token}")
    }
}

/// Trailing `/` or `#` segment of an IRI.
pub fn local_name(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches('/');
    trimmed
        .rsplit(|c| c == '/' || c == '#')
        .next()
        .unwrap_or(trimmed)
}

pub fn default_prefixes() -> Vec<(&'static str, &'static str)> {
    vec![
        ("ex", EX),
        ("rdf", RDF),
        ("rdfs", RDFS),
        ("skos", SKOS),
        ("xsd", XSD),
    ]
}
