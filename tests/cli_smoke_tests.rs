use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ITEMS: &str = r#"[
  {
    "name": "Netflix Premium",
    "kind": "subscription",
    "amount": 22.99,
    "currency": "USD",
    "category": "Streaming",
    "schedule": { "type": "recurring", "frequency": "monthly", "start_date": "2024-01-31" }
  },
  {
    "name": "Spotify",
    "kind": "subscription",
    "amount": 10.99,
    "currency": "USD",
    "category": "Streaming",
    "schedule": { "type": "recurring", "frequency": "monthly", "start_date": "2023-11-16" }
  },
  {
    "name": "Broken",
    "kind": "expense",
    "amount": -5,
    "currency": "USD",
    "schedule": { "type": "one_time", "date": "2024-02-01" }
  },
  {
    "name": "Groceries",
    "kind": "budget",
    "amount": 1250,
    "currency": "USD",
    "category": "Food",
    "schedule": { "type": "standing", "frequency": "monthly" }
  }
]"#;

fn write_items(dir: &Path) -> PathBuf {
    let path = dir.join("items.json");
    fs::write(&path, ITEMS).expect("write items");
    path
}

fn finboard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finboard_cli").expect("binary");
    cmd.env("FINBOARD_HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn renders_projected_renewals_with_badges() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    finboard(&dir)
        .arg(&items)
        .args(["--today", "2024-02-15", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-29"))
        .stdout(predicate::str::contains("in 14 days (medium)"))
        .stdout(predicate::str::contains("in 1 day (high)"))
        .stdout(predicate::str::contains("$22.99"))
        .stdout(predicate::str::contains("$1,250.00"))
        .stdout(predicate::str::contains("every period"))
        .stdout(predicate::str::contains("3 of 3 items shown"))
        .stdout(predicate::str::contains("Broken").not())
        .stderr(predicate::str::contains("skipping invalid item"));
}

#[test]
fn search_and_category_narrow_the_list() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    finboard(&dir)
        .arg(&items)
        .args(["--today", "2024-02-15", "--plain", "--search", "NET"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Netflix Premium"))
        .stdout(predicate::str::contains("Spotify").not())
        .stdout(predicate::str::contains("1 of 3 items shown"));

    finboard(&dir)
        .arg(&items)
        .args(["--today", "2024-02-15", "--plain", "--category", "Food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 3 items shown"));
}

#[test]
fn month_filter_titles_the_table() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    finboard(&dir)
        .arg(&items)
        .args(["--today", "2024-02-15", "--plain", "--month", "2023-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Items for 2023-12"))
        .stdout(predicate::str::contains("Netflix Premium").not())
        .stdout(predicate::str::contains("2 of 3 items shown"));
}

#[test]
fn malformed_month_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    finboard(&dir)
        .arg(&items)
        .args(["--month", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2024-13"));
}

#[test]
fn sort_typo_suggests_a_field() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    finboard(&dir)
        .arg(&items)
        .args(["--sort", "nmae"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean `name`"));
}

#[test]
fn explicit_config_controls_default_order() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    let config = dir.path().join("custom.json");
    fs::write(
        &config,
        r#"{"locale":"en-US","currency":"USD","default_sort":"amount","default_direction":"desc"}"#,
    )
    .expect("write config");

    let output = finboard(&dir)
        .arg(&items)
        .args(["--today", "2024-02-15", "--plain", "--config"])
        .arg(&config)
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let groceries = stdout.find("Groceries").expect("groceries row");
    let netflix = stdout.find("Netflix Premium").expect("netflix row");
    let spotify = stdout.find("Spotify").expect("spotify row");
    assert!(groceries < netflix && netflix < spotify, "{stdout}");
}

#[test]
fn card_view_prints_one_block_per_item() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    finboard(&dir)
        .arg(&items)
        .args(["--today", "2024-02-15", "--plain", "--view", "card", "--search", "netflix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Netflix Premium\n  Kind"))
        .stdout(predicate::str::contains("  Next      2024-02-29"))
        .stdout(predicate::str::contains("in 14 days (medium)"))
        .stdout(predicate::str::contains("1 of 3 items shown"));
}

#[test]
fn configured_card_view_applies_without_flag() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    fs::write(
        dir.path().join("config.json"),
        r#"{"locale":"en-US","currency":"USD","view_mode":"card"}"#,
    )
    .expect("write config");
    finboard(&dir)
        .arg(&items)
        .args(["--today", "2024-02-15", "--plain", "--search", "groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries\n  Kind"));
}

#[test]
fn missing_config_home_is_left_alone() {
    let dir = TempDir::new().expect("tempdir");
    let items = write_items(dir.path());
    let home = dir.path().join("no-such-home");
    finboard(&dir)
        .env("FINBOARD_HOME", &home)
        .arg(&items)
        .args(["--today", "2024-02-15", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 3 items shown"));
    assert!(!home.exists());
}

#[test]
fn missing_items_file_fails_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    finboard(&dir)
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn build_info_needs_no_items() {
    let dir = TempDir::new().expect("tempdir");
    finboard(&dir)
        .arg("--build-info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
