use assert_cmd::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const MENU: &str = "tests/fixtures/menu.json";
const CATALOG_CSV: &str = "tests/fixtures/catalog.csv";

/// Runs the binary against the fixture menu with a throwaway config path so
/// no user configuration leaks into the run.
fn menuseal(dir: &TempDir) -> Command {
    assert!(Path::new(MENU).exists(), "fixture missing");
    let bin = assert_cmd::cargo::cargo_bin!("menuseal");
    let mut cmd = Command::new(bin);
    cmd.env_remove("MENUSEAL_KB_ENDPOINT")
        .env_remove("MENUSEAL_CACHE_PATH")
        .env_remove("RUST_LOG")
        .args(["--config", dir.path().join("menuseal.yaml").to_str().unwrap()]);
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    serde_json::from_str(&stdout).expect("valid json")
}

fn names(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}

#[test]
fn items_lists_classified_catalog() {
    let dir = TempDir::new().unwrap();
    let value = json_stdout(
        menuseal(&dir).args(["-o", "json", "items", "--source", MENU, "--no-cache"]),
    );

    assert_eq!(
        names(&value),
        vec!["Double Burger", "Side Salad", "Vanilla Shake", "Chicken Wrap"]
    );
    let burger = &value[0];
    assert_eq!(burger["company"].as_str(), Some("Burger_Barn"));
    assert_eq!(burger["category"].as_str(), Some("Sandwich"));
    let seals: Vec<&str> = burger["seals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(
        seals,
        vec!["High in Calories", "High in Saturated Fat", "High in Sodium"]
    );

    let salad = &value[1];
    assert_eq!(salad["sodium"].as_f64(), Some(1.0));
    assert!(salad["seals"].as_array().unwrap().is_empty());

    let shake = &value[2];
    assert_eq!(shake["physicalState"].as_str(), Some("liquid"));
    assert_eq!(shake["seals"].as_array().unwrap().len(), 2);
}

#[test]
fn items_filters_by_seal_and_category() {
    let dir = TempDir::new().unwrap();
    let by_seal = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "items",
        "--seal",
        "high in sodium",
        "--source",
        MENU,
        "--no-cache",
    ]));
    assert_eq!(names(&by_seal), vec!["Double Burger", "Chicken Wrap"]);

    let by_category = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "items",
        "--category",
        "drink",
        "--source",
        MENU,
        "--no-cache",
    ]));
    assert_eq!(names(&by_category), vec!["Vanilla Shake"]);
}

#[test]
fn cache_is_written_and_reused() {
    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("seals.json");
    let cache_arg = cache.to_str().unwrap();

    menuseal(&dir)
        .args(["items", "--source", MENU, "--cache", cache_arg])
        .assert()
        .success();
    assert!(cache.exists());

    // The cache alone is enough once it exists.
    let value = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "items",
        "--source",
        dir.path().join("gone.json").to_str().unwrap(),
        "--cache",
        cache_arg,
    ]));
    assert_eq!(names(&value).len(), 4);
}

#[test]
fn missing_source_fails() {
    let dir = TempDir::new().unwrap();
    menuseal(&dir)
        .args([
            "items",
            "--source",
            dir.path().join("nope.json").to_str().unwrap(),
            "--no-cache",
        ])
        .assert()
        .failure();
}

#[test]
fn show_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let value = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "show",
        "chicken wrap",
        "--source",
        MENU,
        "--no-cache",
    ]));
    assert_eq!(value["name"].as_str(), Some("Chicken Wrap"));
    assert_eq!(value["company"].as_str(), Some("Wrap_Stop"));

    let missing = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "show",
        "Fries",
        "--source",
        MENU,
        "--no-cache",
    ]));
    assert!(missing.is_null());
}

#[test]
fn recommend_orders_by_distance() {
    let dir = TempDir::new().unwrap();
    let value = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "recommend",
        "Double Burger",
        "-k",
        "2",
        "--source",
        MENU,
        "--no-cache",
    ]));
    assert_eq!(value["base"]["name"].as_str(), Some("Double Burger"));
    assert_eq!(
        names(&value["recommendations"]),
        vec!["Chicken Wrap", "Vanilla Shake"]
    );

    let unknown = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "recommend",
        "Fries",
        "--source",
        MENU,
        "--no-cache",
    ]));
    assert!(unknown["base"].is_null());
    assert!(unknown["recommendations"].as_array().unwrap().is_empty());
}

#[test]
fn recommend_with_distance_reports_scores() {
    let dir = TempDir::new().unwrap();
    let value = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "recommend",
        "Double Burger",
        "--with-distance",
        "--source",
        MENU,
        "--no-cache",
    ]));
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    let distances: Vec<f64> = entries
        .iter()
        .map(|e| e["distance"].as_f64().unwrap())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn search_matches_substring_and_recommends() {
    let dir = TempDir::new().unwrap();
    let value = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "search",
        "SHAKE",
        "-k",
        "1",
        "--source",
        MENU,
        "--no-cache",
    ]));
    assert_eq!(names(&value["matches"]), vec!["Vanilla Shake"]);
    assert_eq!(value["recommendations"].as_array().unwrap().len(), 1);
}

#[test]
fn audit_reports_coerced_values() {
    let dir = TempDir::new().unwrap();
    let value = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "audit",
        "--source",
        MENU,
        "--no-cache",
    ]));
    let findings = value.as_array().unwrap();
    assert!(findings
        .iter()
        .any(|f| f["name"].as_str() == Some("Side Salad") && f["raw"].as_str() == Some("<5")));

    menuseal(&dir)
        .args(["audit", "--strict", "--source", MENU, "--no-cache"])
        .assert()
        .failure();
}

#[test]
fn rules_lists_builtin_table() {
    let dir = TempDir::new().unwrap();
    let value = json_stdout(menuseal(&dir).args(["-o", "json", "rules"]));
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["HighCalories", "HighSaturatedFat", "HighSodium", "HighSugar"]
    );
}

#[test]
fn seed_writes_a_loadable_dataset() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("seeded.json");
    menuseal(&dir)
        .args(["seed", CATALOG_CSV, "--out", out.to_str().unwrap()])
        .assert()
        .success();
    assert!(out.exists());

    let value = json_stdout(menuseal(&dir).args([
        "-o",
        "json",
        "items",
        "--source",
        out.to_str().unwrap(),
        "--no-cache",
    ]));
    assert_eq!(
        names(&value),
        vec!["Fish Sandwich", "Apple Slices", "Orange Juice"]
    );
    let apple = &value[1];
    assert_eq!(apple["company"].as_str(), Some("FOOD_LION"));
    let juice = &value[2];
    assert_eq!(juice["seals"][0].as_str(), Some("High in Sugar"));
}

#[test]
fn seed_can_write_ntriples() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("seeded.nt");
    menuseal(&dir)
        .args([
            "seed",
            CATALOG_CSV,
            "--out",
            out.to_str().unwrap(),
            "--format",
            "ntriples",
        ])
        .assert()
        .success();
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("<http://example.com/menu#item/1>"));
    assert!(text.contains("\"Fish Sandwich\""));
}

#[test]
fn config_validate_accepts_and_rejects() {
    let dir = TempDir::new().unwrap();
    menuseal(&dir)
        .args(["config", "validate"])
        .assert()
        .success();

    std::fs::write(dir.path().join("menuseal.yaml"), "recommend:\n  k: 0\n").unwrap();
    menuseal(&dir)
        .args(["config", "validate"])
        .assert()
        .failure();
}

#[test]
fn config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();
    menuseal(&dir)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("menuseal.yaml").exists());

    menuseal(&dir)
        .args(["config", "init"])
        .assert()
        .failure();
    menuseal(&dir)
        .args(["config", "validate"])
        .assert()
        .success();
}

#[test]
fn info_prints_configuration() {
    let dir = TempDir::new().unwrap();
    let assert = menuseal(&dir)
        .args(["info", "--source", MENU])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("menuseal System Information"));
    assert!(stdout.contains("tests/fixtures/menu.json"));
    assert!(stdout.contains("High in Sodium"));
}
