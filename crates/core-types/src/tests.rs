use crate::{
    coerce, company_display, company_token, Category, MenuItem, Nutrient, NutrientValue,
    PhysicalState, ReferenceProfile, ToleranceTable,
};

#[test]
fn coercion_handles_bounds_and_garbage() {
    assert_eq!(coerce(Some("<1")), 1.0);
    assert_eq!(coerce(Some("<5")), 1.0);
    assert_eq!(coerce(Some(">500")), 500.0);
    assert_eq!(coerce(Some(">lots")), 1.0);
    assert_eq!(coerce(Some("abc")), 0.0);
    assert_eq!(coerce(Some("")), 0.0);
    assert_eq!(coerce(None), 0.0);
    assert_eq!(coerce(Some(" 12.5 ")), 12.5);
}

#[test]
fn nutrient_value_variants_are_tagged() {
    assert_eq!(NutrientValue::parse("<1"), NutrientValue::AtMost(1.0));
    assert_eq!(NutrientValue::parse(">20"), NutrientValue::AtLeast(20.0));
    assert_eq!(NutrientValue::parse("7"), NutrientValue::Exact(7.0));
    assert_eq!(NutrientValue::parse("NaN"), NutrientValue::Unknown);
    assert_eq!(NutrientValue::parse("-3"), NutrientValue::Unknown);
    assert!(NutrientValue::parse("<1").is_malformed());
    assert!(!NutrientValue::parse("0").is_malformed());
}

#[test]
fn nutrient_parse_accepts_remote_aliases() {
    assert_eq!(Nutrient::parse("fatsaturated"), Some(Nutrient::SaturatedFat));
    assert_eq!(Nutrient::parse("sugar"), Some(Nutrient::Sugars));
    assert_eq!(Nutrient::parse("totalFat"), Some(Nutrient::TotalFat));
    assert_eq!(Nutrient::parse("trans_fat"), Some(Nutrient::TransFat));
    assert_eq!(Nutrient::parse("vitamin c"), None);
    assert!("bogus".parse::<Nutrient>().is_err());
}

#[test]
fn only_four_nutrients_bear_rules() {
    let bearing: Vec<_> = Nutrient::ALL
        .iter()
        .filter(|n| n.is_rule_bearing())
        .collect();
    assert_eq!(bearing.len(), 4);
    assert!(!Nutrient::Protein.is_rule_bearing());
}

#[test]
fn category_parses_tokens_and_iris() {
    assert_eq!("sandwich".parse::<Category>(), Ok(Category::Sandwich));
    assert_eq!(
        "http://example.com/menu#KidsMeal".parse::<Category>(),
        Ok(Category::KidsMeal)
    );
    assert_eq!("Kids Meal".parse::<Category>(), Ok(Category::KidsMeal));
    assert!("Soup".parse::<Category>().is_err());
}

#[test]
fn physical_state_parses_iri() {
    assert_eq!(
        "http://example.com/menu#Liquid".parse::<PhysicalState>(),
        Ok(PhysicalState::Liquid)
    );
    assert_eq!("SOLID".parse::<PhysicalState>(), Ok(PhysicalState::Solid));
    assert_eq!(PhysicalState::default(), PhysicalState::Solid);
}

#[test]
fn company_tokens_are_uri_safe() {
    assert_eq!(company_token("Burger King"), "Burger_King");
    assert_eq!(company_token("  McDonald's  "), "McDonalds");
    assert_eq!(company_token("A&B \"Company\""), "AandB_Company");
    assert_eq!(company_token("Wendy’s"), "Wendys");
    assert_eq!(company_token("Café Co."), "Caf_Co");
    assert_eq!(company_token("http://dbpedia.org/resource/FOOD_LION"), "FOOD_LION");
    assert_eq!(company_display("http://dbpedia.org/resource/FOOD_LION"), "FOOD LION");
    assert_eq!(company_display("Taco_Bell"), "Taco Bell");
}

#[test]
fn tolerance_window_is_additive_around_zero() {
    let table = ToleranceTable::default();
    assert_eq!(table.window(Nutrient::Calories, 250.0), (200.0, 300.0));
    assert_eq!(table.window(Nutrient::Sodium, 0.0), (-100.0, 100.0));
    assert_eq!(ToleranceTable::empty().tolerance(Nutrient::Fiber), 0.0);
}

#[test]
fn reference_profile_deserializes_from_aliases() {
    let profile: ReferenceProfile =
        serde_json::from_str(r#"{"calories": 250, "fatsaturated": 3.5, "sugar": 6}"#).unwrap();
    assert_eq!(profile.len(), 3);
    assert_eq!(profile.get(Nutrient::SaturatedFat), Some(3.5));
    let order: Vec<_> = profile.iter().map(|(n, _)| n).collect();
    assert_eq!(
        order,
        vec![Nutrient::Calories, Nutrient::SaturatedFat, Nutrient::Sugars]
    );
}

#[test]
fn menu_item_serializes_flat_nutrients() {
    let item = MenuItem::new("http://example.com/menu#item/1", "Hamburger")
        .with_company("Burger King")
        .with_nutrient(Nutrient::Calories, 250.0);
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["calories"], 250.0);
    assert_eq!(json["company"], "Burger_King");
    assert_eq!(json["physicalState"], "solid");
    let back: MenuItem = serde_json::from_value(json).unwrap();
    assert_eq!(back, item);
}
