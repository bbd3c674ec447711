//! Similar-item recommendations.
//!
//! Items are compared on the `[calories, protein, totalFat, carbs]` vector
//! with plain Euclidean distance. The search is brute force over the whole
//! catalog; menus are small enough that no index is needed.

use menuseal_core_types::{MenuItem, Nutrient};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_K: usize = 6;

/// Nutrients making up the comparison vector, in order.
pub const FEATURES: [Nutrient; 4] = [
    Nutrient::Calories,
    Nutrient::Protein,
    Nutrient::TotalFat,
    Nutrient::Carbs,
];

pub fn feature_vector(item: &MenuItem) -> [f64; 4] {
    FEATURES.map(|nutrient| item.nutrient(nutrient))
}

pub fn distance(a: &MenuItem, b: &MenuItem) -> f64 {
    feature_vector(a)
        .iter()
        .zip(feature_vector(b).iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// First item whose name matches `name` exactly, ignoring case.
pub fn find_by_name<'a>(name: &str, catalog: &'a [MenuItem]) -> Option<&'a MenuItem> {
    catalog.iter().find(|item| same_name(&item.name, name))
}

/// Up to `k` items nearest to the item named `target`, with their distance.
///
/// Items whose name matches the base name ignoring case are never returned. Ties keep
/// catalog order. An unknown target yields an empty list.
pub fn recommend_with_distance<'a>(
    target: &str,
    catalog: &'a [MenuItem],
    k: usize,
) -> Vec<(&'a MenuItem, f64)> {
    let Some(base) = find_by_name(target, catalog) else {
        debug!(target, "recommendation target not in catalog");
        return Vec::new();
    };
    let mut scored: Vec<(&MenuItem, f64)> = catalog
        .iter()
        .filter(|item| !same_name(&item.name, &base.name))
        .map(|item| (item, distance(base, item)))
        .collect();
    // `sort_by` is stable, which keeps ties in catalog order.
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.truncate(k);
    scored
}

pub fn recommend(target: &str, catalog: &[MenuItem], k: usize) -> Vec<MenuItem> {
    recommend_with_distance(target, catalog, k)
        .into_iter()
        .map(|(item, _)| item.clone())
        .collect()
}

/// Items whose name contains `query`, ignoring case. An empty query matches
/// everything.
pub fn search<'a>(query: &str, catalog: &'a [MenuItem]) -> Vec<&'a MenuItem> {
    let needle = query.trim().to_lowercase();
    catalog
        .iter()
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendations {
    pub base: Option<MenuItem>,
    pub recommendations: Vec<MenuItem>,
}

impl Recommendations {
    pub fn for_target(target: &str, catalog: &[MenuItem], k: usize) -> Self {
        Self {
            base: find_by_name(target, catalog).cloned(),
            recommendations: recommend(target, catalog, k),
        }
    }
}

/// Search results plus recommendations for the first hit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub matches: Vec<MenuItem>,
    pub recommendations: Vec<MenuItem>,
}

pub fn search_and_recommend(query: &str, catalog: &[MenuItem], k: usize) -> SearchOutcome {
    let matches: Vec<MenuItem> = search(query, catalog).into_iter().cloned().collect();
    let recommendations = matches
        .first()
        .map(|first| recommend(&first.name, catalog, k))
        .unwrap_or_default();
    SearchOutcome {
        matches,
        recommendations,
    }
}
