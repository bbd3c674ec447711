use serde::{Deserialize, Serialize};

use crate::item::PhysicalState;
use crate::nutrient::Nutrient;

/// A nutritional-warning definition with one threshold per physical state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SealRule {
    pub id: String,
    pub label: String,
    pub nutrient: Nutrient,
    pub threshold_solid: f64,
    pub threshold_liquid: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl SealRule {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        nutrient: Nutrient,
        threshold_solid: f64,
        threshold_liquid: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            nutrient,
            threshold_solid,
            threshold_liquid,
            unit: Some(nutrient.unit().to_string()),
        }
    }

    pub fn threshold_for(&self, state: PhysicalState) -> f64 {
        match state {
            PhysicalState::Solid => self.threshold_solid,
            PhysicalState::Liquid => self.threshold_liquid,
        }
    }

    pub fn fires(&self, value: f64, state: PhysicalState) -> bool {
        value >= self.threshold_for(state)
    }
}
