use menuseal_core_types::{Nutrient, SealRule};

/// Built-in threshold table. Solid thresholds are per 100 g, liquid per 100 ml.
pub fn default_rules() -> Vec<SealRule> {
    vec![
        SealRule::new(
            "HighCalories",
            "High in Calories",
            Nutrient::Calories,
            275.0,
            70.0,
        ),
        SealRule::new(
            "HighSaturatedFat",
            "High in Saturated Fat",
            Nutrient::SaturatedFat,
            4.0,
            3.0,
        ),
        SealRule::new("HighSodium", "High in Sodium", Nutrient::Sodium, 400.0, 100.0),
        SealRule::new("HighSugar", "High in Sugar", Nutrient::Sugars, 10.0, 5.0),
    ]
}
