//! In-memory triple document.
//!
//! A [`GraphDocument`] behaves like a set of triples that remembers insertion
//! order: adding a triple that is already present is a no-op, and iteration
//! follows first insertion. The item order reported by the store is derived
//! from that order.

mod ntriples;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::vocab;

pub use ntriples::to_ntriples;

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Iri(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: Some(vocab::XSD_STRING.to_string()),
            lang: None,
        })
    }

    pub fn float(value: f64) -> Self {
        Term::Literal(Literal {
            value: format_float(value),
            datatype: Some(vocab::XSD_FLOAT.to_string()),
            lang: None,
        })
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    /// Lexical form: the IRI itself or the literal's value.
    pub fn text(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::Literal(lit) => &lit.value,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub s: String,
    pub p: String,
    pub o: Term,
}

impl Triple {
    pub fn new(s: impl Into<String>, p: impl Into<String>, o: Term) -> Self {
        Self {
            s: s.into(),
            p: p.into(),
            o,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "RawGraphDocument")]
pub struct GraphDocument {
    pub prefixes: BTreeMap<String, String>,
    triples: Vec<Triple>,
    #[serde(skip)]
    index: HashSet<Triple>,
}

#[derive(Deserialize)]
struct RawGraphDocument {
    #[serde(default)]
    prefixes: BTreeMap<String, String>,
    #[serde(default)]
    triples: Vec<Triple>,
}

impl From<RawGraphDocument> for GraphDocument {
    fn from(raw: RawGraphDocument) -> Self {
        GraphDocument::from_triples(raw.prefixes, raw.triples)
    }
}

impl PartialEq for GraphDocument {
    fn eq(&self, other: &Self) -> bool {
        self.prefixes == other.prefixes && self.triples == other.triples
    }
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty document with the `ex`, `rdf`, `rdfs`, `skos` and `xsd` prefixes bound.
    pub fn with_default_prefixes() -> Self {
        let mut doc = Self::new();
        for (prefix, iri) in vocab::default_prefixes() {
            doc.prefixes.insert(prefix.to_string(), iri.to_string());
        }
        doc
    }

    /// Builds a document from raw triples, dropping duplicates.
    pub fn from_triples(prefixes: BTreeMap<String, String>, triples: Vec<Triple>) -> Self {
        let mut doc = Self {
            prefixes,
            ..Default::default()
        };
        for triple in triples {
            doc.insert(triple);
        }
        doc
    }

    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.index.contains(&triple) {
            return false;
        }
        self.index.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn add(&mut self, s: &str, p: &str, o: Term) -> bool {
        self.insert(Triple::new(s, p, o))
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.index.contains(triple)
    }

    /// Set union; prefixes already bound in `self` win.
    pub fn merge(&mut self, other: GraphDocument) {
        for (prefix, iri) in other.prefixes {
            self.prefixes.entry(prefix).or_insert(iri);
        }
        for triple in other.triples {
            self.insert(triple);
        }
    }

    /// Removes every `(s, p, *)` triple, returning how many were dropped.
    pub fn remove_matching(&mut self, s: &str, p: &str) -> usize {
        let before = self.triples.len();
        let index = &mut self.index;
        self.triples.retain(|t| {
            let keep = !(t.s == s && t.p == p);
            if !keep {
                index.remove(t);
            }
            keep
        });
        before - self.triples.len()
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn objects<'a>(&'a self, s: &'a str, p: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.s == s && t.p == p)
            .map(|t| &t.o)
    }

    pub fn object(&self, s: &str, p: &str) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| t.s == s && t.p == p)
            .map(|t| &t.o)
    }

    /// Subjects typed `type_iri`, in order of their first type triple.
    pub fn subjects_of_type(&self, type_iri: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.triples
            .iter()
            .filter(|t| t.p == vocab::RDF_TYPE && t.o.as_iri() == Some(type_iri))
            .filter(|t| seen.insert(t.s.as_str()))
            .map(|t| t.s.as_str())
            .collect()
    }

    pub fn has_type(&self, s: &str, type_iri: &str) -> bool {
        self.objects(s, vocab::RDF_TYPE)
            .any(|o| o.as_iri() == Some(type_iri))
    }

    pub fn to_ntriples(&self) -> String {
        to_ntriples(self)
    }
}

/// Shortest decimal rendering that parses back to the same value
/// (`250.0` -> `"250.0"`, `0.5` -> `"0.5"`).
pub fn format_float(value: f64) -> String {
    let rendered = format!("{value}");
    if rendered.contains(['.', 'e', 'E']) || !value.is_finite() {
        rendered
    } else {
        format!("{rendered}.0")
    }
}
