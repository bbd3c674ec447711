use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nutrient::Nutrient;

/// Target nutrient values for tolerance-window retrieval.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceProfile(BTreeMap<Nutrient, f64>);

impl ReferenceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.0.insert(nutrient, value);
        self
    }

    pub fn insert(&mut self, nutrient: Nutrient, value: f64) -> Option<f64> {
        self.0.insert(nutrient, value)
    }

    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        self.0.get(&nutrient).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in canonical nutrient order.
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        self.0.iter().map(|(n, v)| (*n, *v))
    }
}

impl FromIterator<(Nutrient, f64)> for ReferenceProfile {
    fn from_iter<T: IntoIterator<Item = (Nutrient, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Absolute ± tolerance per nutrient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToleranceTable(BTreeMap<Nutrient, f64>);

impl Default for ToleranceTable {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Nutrient::Calories, 50.0),
            (Nutrient::TotalFat, 3.0),
            (Nutrient::SaturatedFat, 2.0),
            (Nutrient::TransFat, 0.5),
            (Nutrient::Cholesterol, 20.0),
            (Nutrient::Sodium, 100.0),
            (Nutrient::Carbs, 10.0),
            (Nutrient::Fiber, 2.0),
            (Nutrient::Sugars, 2.0),
            (Nutrient::Protein, 5.0),
        ]))
    }
}

impl ToleranceTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Missing entries have zero tolerance.
    pub fn tolerance(&self, nutrient: Nutrient) -> f64 {
        self.0.get(&nutrient).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, nutrient: Nutrient, tolerance: f64) {
        self.0.insert(nutrient, tolerance.abs());
    }

    /// Inclusive `[value - tol, value + tol]` window.
    pub fn window(&self, nutrient: Nutrient, value: f64) -> (f64, f64) {
        let tol = self.tolerance(nutrient);
        (value - tol, value + tol)
    }

    /// Overrides entries present in `other`, keeping the rest.
    pub fn merged(mut self, other: &BTreeMap<Nutrient, f64>) -> Self {
        for (nutrient, tol) in other {
            self.set(*nutrient, *tol);
        }
        self
    }
}
