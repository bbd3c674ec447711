use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// The ten nutrients tracked on every menu item.
///
/// Declaration order is the canonical order used for query filters and
/// serialized output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Nutrient {
    Calories,
    TotalFat,
    SaturatedFat,
    TransFat,
    Cholesterol,
    Sodium,
    Carbs,
    Fiber,
    Sugars,
    Protein,
}

impl Nutrient {
    pub const ALL: [Nutrient; 10] = [
        Nutrient::Calories,
        Nutrient::TotalFat,
        Nutrient::SaturatedFat,
        Nutrient::TransFat,
        Nutrient::Cholesterol,
        Nutrient::Sodium,
        Nutrient::Carbs,
        Nutrient::Fiber,
        Nutrient::Sugars,
        Nutrient::Protein,
    ];

    /// Nutrients that may carry a seal rule.
    pub const RULE_BEARING: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::SaturatedFat,
        Nutrient::Sodium,
        Nutrient::Sugars,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::TotalFat => "totalFat",
            Nutrient::SaturatedFat => "saturatedFat",
            Nutrient::TransFat => "transFat",
            Nutrient::Cholesterol => "cholesterol",
            Nutrient::Sodium => "sodium",
            Nutrient::Carbs => "carbs",
            Nutrient::Fiber => "fiber",
            Nutrient::Sugars => "sugars",
            Nutrient::Protein => "protein",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Cholesterol | Nutrient::Sodium => "mg",
            _ => "g",
        }
    }

    pub fn is_rule_bearing(&self) -> bool {
        Self::RULE_BEARING.contains(self)
    }

    /// Accepts the camelCase predicate names as well as the lowercase
    /// spellings used by the remote knowledge base (`fatsaturated`, `sugar`).
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        let nutrient = match normalized.as_str() {
            "calories" | "energy" | "kcal" => Nutrient::Calories,
            "totalfat" | "fat" => Nutrient::TotalFat,
            "saturatedfat" | "fatsaturated" => Nutrient::SaturatedFat,
            "transfat" | "fattrans" => Nutrient::TransFat,
            "cholesterol" => Nutrient::Cholesterol,
            "sodium" => Nutrient::Sodium,
            "carbs" | "carbohydrates" => Nutrient::Carbs,
            "fiber" | "fibre" => Nutrient::Fiber,
            "sugars" | "sugar" => Nutrient::Sugars,
            "protein" => Nutrient::Protein,
            _ => return None,
        };
        Some(nutrient)
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nutrient {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nutrient::parse(s).ok_or_else(|| CoreError::UnknownNutrient(s.to_string()))
    }
}

impl TryFrom<String> for Nutrient {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Nutrient> for String {
    fn from(value: Nutrient) -> Self {
        value.as_str().to_string()
    }
}

/// A raw nutrient literal after classification of its textual shape.
///
/// Source data mixes plain numbers with bounds such as `<1` or `>500`.
/// [`NutrientValue::resolve`] is the only place those shapes become numbers:
///
/// | variant       | resolves to |
/// |---------------|-------------|
/// | `Exact(v)`    | `v`         |
/// | `AtMost(_)`   | `1.0`       |
/// | `AtLeast(v)`  | `v`         |
/// | `Unknown`     | `0.0`       |
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NutrientValue {
    Exact(f64),
    AtMost(f64),
    AtLeast(f64),
    Unknown,
}

impl NutrientValue {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix('<') {
            return NutrientValue::AtMost(parse_amount(rest).unwrap_or(1.0));
        }
        if let Some(rest) = trimmed.strip_prefix('>') {
            return NutrientValue::AtLeast(parse_amount(rest).unwrap_or(1.0));
        }
        match parse_amount(trimmed) {
            Some(value) => NutrientValue::Exact(value),
            None => NutrientValue::Unknown,
        }
    }

    pub fn from_literal(raw: Option<&str>) -> Self {
        raw.map(NutrientValue::parse)
            .unwrap_or(NutrientValue::Unknown)
    }

    pub fn resolve(self) -> f64 {
        match self {
            NutrientValue::Exact(value) => value,
            NutrientValue::AtMost(_) => 1.0,
            NutrientValue::AtLeast(value) => value,
            NutrientValue::Unknown => 0.0,
        }
    }

    /// True when the literal was not a plain number.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, NutrientValue::Exact(_))
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Coerces an optional literal straight to a number.
pub fn coerce(raw: Option<&str>) -> f64 {
    NutrientValue::from_literal(raw).resolve()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nutrients {
    pub calories: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub trans_fat: f64,
    pub cholesterol: f64,
    pub sodium: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugars: f64,
    pub protein: f64,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::TotalFat => self.total_fat,
            Nutrient::SaturatedFat => self.saturated_fat,
            Nutrient::TransFat => self.trans_fat,
            Nutrient::Cholesterol => self.cholesterol,
            Nutrient::Sodium => self.sodium,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sugars => self.sugars,
            Nutrient::Protein => self.protein,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        let slot = match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::TotalFat => &mut self.total_fat,
            Nutrient::SaturatedFat => &mut self.saturated_fat,
            Nutrient::TransFat => &mut self.trans_fat,
            Nutrient::Cholesterol => &mut self.cholesterol,
            Nutrient::Sodium => &mut self.sodium,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::Sugars => &mut self.sugars,
            Nutrient::Protein => &mut self.protein,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.iter().map(move |n| (*n, self.get(*n)))
    }
}
