//! Seal classification.
//!
//! Every rule is evaluated on its own: an item may end up with any subset of
//! the labels, including none or all of them. The functions here never fail
//! and return the same set for the same inputs, so reclassifying an item is
//! always safe.

use std::collections::BTreeSet;

use menuseal_core_types::{MenuItem, Nutrients, PhysicalState, SealRule};

/// Rules whose threshold for `state` is met by `nutrients`, in rule order.
pub fn fired_rules<'a>(
    nutrients: &'a Nutrients,
    state: PhysicalState,
    rules: &'a [SealRule],
) -> impl Iterator<Item = &'a SealRule> + 'a {
    rules
        .iter()
        .filter(move |rule| rule.fires(nutrients.get(rule.nutrient), state))
}

pub fn classify_nutrients(
    nutrients: &Nutrients,
    state: PhysicalState,
    rules: &[SealRule],
) -> BTreeSet<String> {
    fired_rules(nutrients, state, rules)
        .map(|rule| rule.label.clone())
        .collect()
}

/// Labels the item earns under its own physical state.
pub fn classify(item: &MenuItem, rules: &[SealRule]) -> BTreeSet<String> {
    classify_nutrients(&item.nutrients, item.physical_state, rules)
}

/// Labels the item would earn if it were in `state`.
pub fn classify_as(item: &MenuItem, rules: &[SealRule], state: PhysicalState) -> BTreeSet<String> {
    classify_nutrients(&item.nutrients, state, rules)
}

/// Replaces the item's seal set with a fresh classification.
pub fn reclassify(item: &mut MenuItem, rules: &[SealRule]) {
    item.seals = classify(item, rules);
}
