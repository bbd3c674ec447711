//! SPARQL text for the two retrieval round-trips. Nothing here performs I/O.

use std::fmt::Write;

use menuseal_core_types::{Nutrient, ReferenceProfile, ToleranceTable};

use crate::config::KnowledgeBaseConfig;
use crate::errors::RetrievalError;

const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// Inclusive bounds on one nutrient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeFilter {
    pub nutrient: Nutrient,
    pub min: f64,
    pub max: f64,
}

impl RangeFilter {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// `reference ± tolerance` for every nutrient present in `reference`.
pub fn build_filters(reference: &ReferenceProfile, tolerances: &ToleranceTable) -> Vec<RangeFilter> {
    reference
        .iter()
        .map(|(nutrient, value)| {
            let (min, max) = tolerances.window(nutrient, value);
            RangeFilter { nutrient, min, max }
        })
        .collect()
}

/// The primary query: every food carrying all configured nutrient
/// statements, restricted by `filters`.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityQuery {
    pub filters: Vec<RangeFilter>,
    pub limit: usize,
}

impl SimilarityQuery {
    pub fn new(filters: Vec<RangeFilter>, limit: usize) -> Self {
        Self { filters, limit }
    }

    pub fn render(&self, config: &KnowledgeBaseConfig) -> Result<String, RetrievalError> {
        if self.limit == 0 {
            return Err(RetrievalError::invalid_input("limit must be positive"));
        }
        let mut properties = Vec::new();
        for nutrient in Nutrient::ALL {
            if let Some(pid) = config.properties.get(&nutrient) {
                validate_property(pid)?;
                properties.push((nutrient, pid.as_str()));
            }
        }
        if properties.is_empty() {
            return Err(RetrievalError::invalid_input("no nutrient properties configured"));
        }

        let mut out = String::new();
        let _ = writeln!(out, "PREFIX wb: <{}>", config.entity_prefix());
        let _ = writeln!(out, "PREFIX p: <{}>", config.property_prefix());
        let _ = writeln!(out, "PREFIX ps: <{}>", config.statement_prefix());
        let _ = writeln!(out, "PREFIX rdfs: <{RDFS}>");
        out.push_str("SELECT ?food");
        for (nutrient, _) in &properties {
            let _ = write!(out, " ?{}", nutrient.as_str());
        }
        out.push_str(" WHERE {\n");
        for (nutrient, pid) in &properties {
            let var = nutrient.as_str();
            let _ = writeln!(out, "  ?food p:{pid} ?{var}Stmt. ?{var}Stmt ps:{pid} ?{var}.");
        }
        for filter in &self.filters {
            if !properties.iter().any(|(n, _)| *n == filter.nutrient) {
                return Err(RetrievalError::invalid_input(format!(
                    "no property configured for {}",
                    filter.nutrient
                )));
            }
            let var = filter.nutrient.as_str();
            let _ = writeln!(
                out,
                "  FILTER(?{var} >= {} && ?{var} <= {})",
                decimal(filter.min)?,
                decimal(filter.max)?
            );
        }
        out.push_str("}\n");
        let _ = write!(out, "LIMIT {}", self.limit);
        Ok(out)
    }
}

/// Label lookup for a set of entities in one language.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelQuery {
    ids: Vec<String>,
    language: String,
}

impl LabelQuery {
    pub fn new(ids: Vec<String>, language: &str) -> Result<Self, RetrievalError> {
        validate_language(language)?;
        if ids.is_empty() {
            return Err(RetrievalError::invalid_input("label query without entities"));
        }
        for id in &ids {
            if !is_entity_id(id) {
                return Err(RetrievalError::invalid_input(format!("invalid entity id {id:?}")));
            }
        }
        Ok(Self {
            ids,
            language: language.to_string(),
        })
    }

    pub fn render(&self, config: &KnowledgeBaseConfig) -> String {
        let values = self
            .ids
            .iter()
            .map(|id| format!("wb:{id}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "PREFIX wb: <{}>\nPREFIX rdfs: <{RDFS}>\nSELECT ?food ?foodLabel WHERE {{\n  VALUES ?food {{ {values} }}\n  ?food rdfs:label ?foodLabel .\n  FILTER(LANG(?foodLabel) = \"{}\")\n}}",
            config.entity_prefix(),
            self.language
        )
    }
}

/// Plain decimal rendering; NaN and infinities are rejected.
fn decimal(value: f64) -> Result<String, RetrievalError> {
    if !value.is_finite() {
        return Err(RetrievalError::invalid_input(format!("non-finite bound {value}")));
    }
    Ok(format!("{value}"))
}

/// `en`, `pt-BR`, `zh-Hans-CN` style tags.
pub fn validate_language(tag: &str) -> Result<(), RetrievalError> {
    let mut parts = tag.split('-');
    let primary = parts.next().unwrap_or_default();
    let primary_ok = (1..=8).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    let rest_ok = parts.all(|p| (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric()));
    if primary_ok && rest_ok {
        Ok(())
    } else {
        Err(RetrievalError::invalid_input(format!("invalid language tag {tag:?}")))
    }
}

fn validate_property(pid: &str) -> Result<(), RetrievalError> {
    if pid.starts_with('P') && is_entity_id(pid) {
        Ok(())
    } else {
        Err(RetrievalError::invalid_input(format!("invalid property id {pid:?}")))
    }
}

/// Wikibase ids: one uppercase letter followed by digits (`Q42`, `P18`).
pub fn is_entity_id(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && id.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}

/// Trailing path segment of an entity IRI.
pub fn trailing_segment(iri: &str) -> &str {
    iri.trim_end_matches('/').rsplit('/').next().unwrap_or(iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_follow_tolerances() {
        let reference = ReferenceProfile::new()
            .with(Nutrient::Calories, 250.0)
            .with(Nutrient::Sodium, 520.0);
        let filters = build_filters(&reference, &ToleranceTable::default());
        assert_eq!(
            filters,
            vec![
                RangeFilter { nutrient: Nutrient::Calories, min: 200.0, max: 300.0 },
                RangeFilter { nutrient: Nutrient::Sodium, min: 420.0, max: 620.0 },
            ]
        );
        assert!(filters[0].contains(200.0));
        assert!(!filters[0].contains(300.5));
    }

    #[test]
    fn empty_reference_has_no_filters() {
        let filters = build_filters(&ReferenceProfile::new(), &ToleranceTable::default());
        assert!(filters.is_empty());
        let text = SimilarityQuery::new(filters, 5)
            .render(&KnowledgeBaseConfig::default())
            .unwrap();
        assert!(!text.contains("FILTER"));
        assert!(text.ends_with("LIMIT 5"));
    }

    #[test]
    fn renders_statement_patterns_and_bounds() {
        let query = SimilarityQuery::new(
            vec![RangeFilter { nutrient: Nutrient::TransFat, min: 0.0, max: 1.0 }],
            100,
        );
        let text = query.render(&KnowledgeBaseConfig::default()).unwrap();
        assert!(text.contains("PREFIX wb: <https://wikifcd.wikibase.cloud/entity/>"));
        assert!(text.contains("PREFIX ps: <https://wikifcd.wikibase.cloud/prop/statement/>"));
        assert!(text.contains("?food p:P18 ?sodiumStmt. ?sodiumStmt ps:P18 ?sodium."));
        assert!(text.contains("FILTER(?transFat >= 0 && ?transFat <= 1)"));
        assert!(text.contains("LIMIT 100"));
    }

    #[test]
    fn rejects_bad_input() {
        let config = KnowledgeBaseConfig::default();
        assert!(SimilarityQuery::new(vec![], 0).render(&config).is_err());
        let nan = RangeFilter { nutrient: Nutrient::Fiber, min: f64::NAN, max: 1.0 };
        assert!(SimilarityQuery::new(vec![nan], 10).render(&config).is_err());

        assert!(LabelQuery::new(vec!["Q1".into()], "en\") . }").is_err());
        assert!(LabelQuery::new(vec!["Q1 }".into()], "en").is_err());
        assert!(LabelQuery::new(vec![], "en").is_err());
    }

    #[test]
    fn label_query_lists_values() {
        let query = LabelQuery::new(vec!["Q1".into(), "Q20".into()], "pt-BR").unwrap();
        let text = query.render(&KnowledgeBaseConfig::default());
        assert!(text.contains("VALUES ?food { wb:Q1 wb:Q20 }"));
        assert!(text.contains("FILTER(LANG(?foodLabel) = \"pt-BR\")"));
    }

    #[test]
    fn entity_ids() {
        assert!(is_entity_id("Q42"));
        assert!(!is_entity_id("Q"));
        assert!(!is_entity_id("q42"));
        assert!(!is_entity_id("Q4x"));
        assert_eq!(trailing_segment("https://kb.example/entity/Q42"), "Q42");
    }
}
