use std::collections::HashSet;

use menuseal_core_types::SealRule;

use crate::defaults::default_rules;
use crate::errors::RuleError;

/// Validated, ordered set of seal rules.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleTable {
    rules: Vec<SealRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl RuleTable {
    pub fn new(rules: Vec<SealRule>) -> Result<Self, RuleError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !rule.nutrient.is_rule_bearing() {
                return Err(RuleError::UnsupportedNutrient(rule.nutrient));
            }
            for value in [rule.threshold_solid, rule.threshold_liquid] {
                if !value.is_finite() || value < 0.0 {
                    return Err(RuleError::InvalidThreshold {
                        id: rule.id.clone(),
                        value,
                    });
                }
            }
            if rule.id.trim().is_empty() || rule.label.trim().is_empty() {
                return Err(RuleError::Invalid(format!(
                    "rule for {} needs both id and label",
                    rule.nutrient
                )));
            }
            if !seen.insert(rule.id.clone()) {
                return Err(RuleError::DuplicateId(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SealRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<SealRule> {
        self.rules
    }

    pub fn by_id(&self, id: &str) -> Option<&SealRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn by_label(&self, label: &str) -> Option<&SealRule> {
        self.rules
            .iter()
            .find(|rule| rule.label.eq_ignore_ascii_case(label))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
