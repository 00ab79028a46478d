//! Integration tests for the cropcare binary.
//!
//! Every test runs with `--no-redis`, and `recommend` with `--offline`, so no
//! external service is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to the CLI binary with the test-safe flags applied
fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cropcare"));
    cmd.arg("--no-redis").env("RUST_LOG", "error");
    cmd
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("cropcare"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Crop disease treatment advisor"));
}

#[test]
fn test_recommend_ranks_by_effectiveness() {
    let output = cli()
        .args(["--offline", "recommend", "anthracnose", "--location", "Accra"])
        .output()
        .expect("Failed to run cropcare");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mancozeb = stdout.find("Mancozeb fungicide").expect("Mancozeb missing");
    let copper = stdout.find("Copper-based fungicide").expect("Copper missing");
    let neem = stdout.find("Neem oil treatment").expect("Neem missing");
    assert!(mancozeb < copper && copper < neem);
    assert!(stdout.contains("Greater Accra Regional Agriculture Office"));
}

#[test]
fn test_recommend_organic_only() {
    cli()
        .args(["--offline", "recommend", "Anthracnose ", "--location", "Accra", "--organic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Neem oil treatment"))
        .stdout(predicate::str::contains("Mancozeb").not());
}

#[test]
fn test_recommend_json_report() {
    let output = cli()
        .args([
            "--offline",
            "recommend",
            "fall armyworm",
            "--location",
            "Tema",
            "--severity",
            "low",
            "--json",
        ])
        .output()
        .expect("Failed to run cropcare");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(report["crop"], "maize");
    assert_eq!(report["severity"], "low");
    let treatments = report["recommended_treatments"].as_array().unwrap();
    assert_eq!(treatments.len(), 2);
    assert_eq!(treatments[0]["name"], "Chlorantraniliprole");
    assert_eq!(treatments[0]["type"], "chemical");
}

#[test]
fn test_unknown_disease_suggests_alternatives() {
    cli()
        .args(["--offline", "recommend", "rust_leaf", "--location", "Accra"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Disease not found: rust_leaf"))
        .stderr(predicate::str::contains("red_rust"));
}

#[test]
fn test_invalid_severity_names_field() {
    cli()
        .args(["--offline", "recommend", "mosaic", "--severity", "extreme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("severity"));
}

#[test]
fn test_invalid_budget_rejected() {
    cli()
        .args(["--offline", "recommend", "mosaic", "--budget", "cheap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("budget"));
}

#[test]
fn test_recommend_quick_summary() {
    cli()
        .args(["recommend", "anthracnose", "--quick", "--severity", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Mancozeb fungicide"))
        .stdout(predicate::str::contains("Prevention tip: Proper spacing for air circulation"))
        .stdout(predicate::str::contains("Emergency contacts").not());
}

#[test]
fn test_suppliers_filtered_by_product() {
    cli()
        .args(["--offline", "suppliers", "Accra", "--radius", "20", "--product", "fungicides"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 suppliers"))
        .stdout(predicate::str::contains("Chemico Limited"))
        .stdout(predicate::str::contains("Yara Ghana Limited").not());
}

#[test]
fn test_suppliers_unknown_location_fails() {
    cli()
        .args(["--offline", "suppliers", "Lagos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find coordinates for location: Lagos"));
}

#[test]
fn test_diseases_for_crop() {
    cli()
        .args(["diseases", "--crop", "tomato"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leaf_curl"))
        .stdout(predicate::str::contains("fall_armyworm").not());
}

#[test]
fn test_diseases_lists_every_crop() {
    cli()
        .arg("diseases")
        .assert()
        .success()
        .stdout(predicate::str::contains("cashew:"))
        .stdout(predicate::str::contains("cassava:"))
        .stdout(predicate::str::contains("maize:"))
        .stdout(predicate::str::contains("tomato:"));
}

#[test]
fn test_info_resolves_crop_qualified_name() {
    cli()
        .args(["info", "Tomato Leaf Blight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alternaria solani"));
}

#[test]
fn test_prices_with_location() {
    cli()
        .args(["--offline", "prices", "Mancozeb", "--location", "Kumasi", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kumasi"))
        .stdout(predicate::str::contains("Average GHS"));
}

#[test]
fn test_cache_stats_and_health() {
    cli()
        .args(["cache", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hit rate: 0.00%"))
        .stdout(predicate::str::contains("External tier: disabled"));

    cli()
        .args(["cache", "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("memory: healthy"))
        .stdout(predicate::str::contains("external: disabled"));
}

#[test]
fn test_cache_clear_on_empty_cache() {
    cli()
        .args(["cache", "clear", "disease_info:"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 entries"));
}

#[test]
fn test_config_file_is_honored() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[cache]\nnamespace = \"custom\"\nmemory_capacity = 7\n").unwrap();

    cli()
        .arg("--config")
        .arg(&path)
        .args(["cache", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Memory entries: 0/7"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[cache]\nmemory_capacity = 0\n").unwrap();

    cli()
        .arg("--config")
        .arg(&path)
        .args(["cache", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("memory_capacity"));
}
