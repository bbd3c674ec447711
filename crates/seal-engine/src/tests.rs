use std::collections::BTreeSet;
use std::env;
use std::sync::{Mutex, OnceLock};

use menuseal_core_types::{MenuItem, Nutrient, PhysicalState, SealRule};

use crate::classify::{classify, classify_as, reclassify};
use crate::defaults::default_rules;
use crate::errors::RuleError;
use crate::loader::{load_rules, load_rules_with_options, LoadOptions};
use crate::table::RuleTable;

fn item(calories: f64, saturated_fat: f64, sodium: f64, sugars: f64) -> MenuItem {
    MenuItem::new("http://example.com/menu#item/1", "probe")
        .with_nutrient(Nutrient::Calories, calories)
        .with_nutrient(Nutrient::SaturatedFat, saturated_fat)
        .with_nutrient(Nutrient::Sodium, sodium)
        .with_nutrient(Nutrient::Sugars, sugars)
}

fn labels(raw: &[&str]) -> BTreeSet<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn low_solid_item_earns_no_seals() {
    let rules = default_rules();
    let probe = item(100.0, 0.0, 50.0, 1.0);
    assert!(classify(&probe, &rules).is_empty());
}

#[test]
fn thresholds_are_inclusive() {
    let rules = default_rules();
    let probe = item(275.0, 4.0, 400.0, 10.0);
    assert_eq!(
        classify(&probe, &rules),
        labels(&[
            "High in Calories",
            "High in Saturated Fat",
            "High in Sodium",
            "High in Sugar"
        ])
    );
}

#[test]
fn liquid_threshold_governs_liquids() {
    let rules = default_rules();
    // 80 kcal: below the solid threshold (275), above the liquid one (70).
    let drink = item(80.0, 0.0, 0.0, 0.0).with_state(PhysicalState::Liquid);
    assert_eq!(classify(&drink, &rules), labels(&["High in Calories"]));
    assert!(classify_as(&drink, &rules, PhysicalState::Solid).is_empty());

    // 300 kcal solid with a liquid threshold above it must still fire on solid.
    let custom = vec![SealRule::new(
        "HighCalories",
        "High in Calories",
        Nutrient::Calories,
        200.0,
        500.0,
    )];
    let snack = item(300.0, 0.0, 0.0, 0.0);
    assert_eq!(classify(&snack, &custom), labels(&["High in Calories"]));
    let shake = snack.clone().with_state(PhysicalState::Liquid);
    assert!(classify(&shake, &custom).is_empty());
}

#[test]
fn reclassification_is_idempotent() {
    let rules = default_rules();
    let mut probe = item(500.0, 1.0, 900.0, 2.0);
    probe.seals.insert("stale".into());
    reclassify(&mut probe, &rules);
    let first = probe.seals.clone();
    reclassify(&mut probe, &rules);
    assert_eq!(probe.seals, first);
    assert!(!first.contains("stale"));
    assert_eq!(first, labels(&["High in Calories", "High in Sodium"]));
}

#[test]
fn rule_table_rejects_non_bearing_nutrient() {
    let rules = vec![SealRule::new("HighProtein", "High in Protein", Nutrient::Protein, 1.0, 1.0)];
    assert!(matches!(
        RuleTable::new(rules),
        Err(RuleError::UnsupportedNutrient(Nutrient::Protein))
    ));
}

#[test]
fn rule_table_rejects_duplicates() {
    let mut rules = default_rules();
    rules.push(rules[0].clone());
    assert!(matches!(RuleTable::new(rules), Err(RuleError::DuplicateId(_))));
}

#[test]
fn rule_table_resolves_labels() {
    let table = RuleTable::default();
    assert_eq!(table.by_label("high in sugar").unwrap().id, "HighSugar");
    assert_eq!(table.by_id("HighSodium").unwrap().nutrient, Nutrient::Sodium);
    assert!(table.by_id("HighProtein").is_none());
}

#[test]
fn load_rules_reads_yaml_file() {
    let _guard = env_guard().lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("seals.yaml");
    std::fs::write(
        &file_path,
        r#"rules:
  - id: HighSugar
    label: Sugar warning
    nutrient: sugar
    threshold_solid: 12
    threshold_liquid: 6
"#,
    )
    .unwrap();

    let table = load_rules_with_options(&LoadOptions {
        paths: vec![file_path],
        include_env: false,
    })
    .unwrap();
    assert_eq!(table.len(), 1);
    let rule = &table.rules()[0];
    assert_eq!(rule.nutrient, Nutrient::Sugars);
    assert_eq!(rule.threshold_solid, 12.0);
    assert_eq!(rule.label, "Sugar warning");
}

#[test]
fn missing_file_keeps_defaults() {
    let _guard = env_guard().lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let table = load_rules_with_options(&LoadOptions {
        paths: vec![dir.path().join("absent.yaml")],
        include_env: false,
    })
    .unwrap();
    assert_eq!(table.rules(), default_rules().as_slice());
}

#[test]
fn env_overrides_adjust_thresholds() {
    let _guard = env_guard().lock().unwrap();
    let key = "MENUSEAL_SEAL__HIGHSODIUM__THRESHOLD_SOLID";
    env::set_var(key, "350");
    let table = load_rules(None);
    env::remove_var(key);
    let table = table.unwrap();
    assert_eq!(table.by_id("HighSodium").unwrap().threshold_solid, 350.0);
}

#[test]
fn env_override_with_bad_field_is_rejected() {
    let _guard = env_guard().lock().unwrap();
    let key = "MENUSEAL_SEAL__HIGHSUGAR__COLOUR";
    env::set_var(key, "red");
    let result = load_rules(None);
    env::remove_var(key);
    assert!(matches!(result, Err(RuleError::Invalid(_))));
}

fn env_guard() -> &'static Mutex<()> {
    static ENV_GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_GUARD.get_or_init(|| Mutex::new(()))
}
