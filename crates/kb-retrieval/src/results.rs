use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `application/sparql-results+json` body. Missing `results` or `bindings`
/// decode as an empty result set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub results: ResultSet,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub bindings: Vec<HashMap<String, BindingValue>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BindingValue {
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl BindingValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: Some("literal".to_string()),
            lang: None,
        }
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: Some("uri".to_string()),
            lang: None,
        }
    }
}

impl SparqlResults {
    pub fn from_rows(rows: Vec<HashMap<String, BindingValue>>) -> Self {
        Self {
            results: ResultSet { bindings: rows },
        }
    }

    pub fn rows(&self) -> &[HashMap<String, BindingValue>] {
        &self.results.bindings
    }

    pub fn into_rows(self) -> Vec<HashMap<String, BindingValue>> {
        self.results.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }
}
