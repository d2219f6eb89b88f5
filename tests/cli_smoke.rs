//! CLI smoke tests covering check/batch behaviour and exit codes.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

const WITHIN_BUDGET: &str = r#"{
  "reference": "cart-1",
  "company_user": {
    "company_id": 7,
    "company_business_unit": { "order_budget": { "budget": 1000 } }
  },
  "totals": { "subtotal": 500 }
}"#;

const OVER_BUDGET: &str = r#"{
  "reference": "cart-2",
  "company_user": {
    "company_id": 7,
    "company_business_unit": { "order_budget": { "budget": 100 } }
  },
  "totals": { "subtotal": 500 }
}"#;

#[test]
fn check_accepts_quote_within_budget() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let quote = temp.path().join("quote.json");
    fs::write(&quote, WITHIN_BUDGET)?;

    cargo_bin_cmd!("order-budget")
        .args(["check", "--quote"])
        .arg(&quote)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
    Ok(())
}

#[test]
fn check_rejects_quote_over_budget() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let quote = temp.path().join("quote.json");
    fs::write(&quote, OVER_BUDGET)?;

    cargo_bin_cmd!("order-budget")
        .args(["check", "--quote"])
        .arg(&quote)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not enough order budget."))
        .stderr(predicate::str::contains("cart-2"));
    Ok(())
}

#[test]
fn unlimited_grant_overrides_budget() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let quote = temp.path().join("quote.json");
    fs::write(&quote, OVER_BUDGET)?;
    let grants = temp.path().join("grants.json");
    fs::write(&grants, r#"{ "AlterCartWithoutLimit": [7] }"#)?;

    cargo_bin_cmd!("order-budget")
        .args(["check", "--quote"])
        .arg(&quote)
        .arg("--grants")
        .arg(&grants)
        .assert()
        .success();

    cargo_bin_cmd!("order-budget")
        .args(["check", "--allow-unlimited", "7", "--quote"])
        .arg(&quote)
        .assert()
        .success();
    Ok(())
}

#[test]
fn check_json_reports_code() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let quote = temp.path().join("quote.json");
    fs::write(&quote, r#"{ "totals": { "subtotal": 5 } }"#)?;

    cargo_bin_cmd!("order-budget")
        .args(["check", "--json", "--quote"])
        .arg(&quote)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("\"not_owned_by_company_user\""))
        .stdout(predicate::str::contains("Quote is not owned by company user."));
    Ok(())
}

#[test]
fn batch_summarises_and_writes_report() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let quotes = temp.path().join("quotes.json");
    fs::write(&quotes, format!("[{WITHIN_BUDGET}, {OVER_BUDGET}]"))?;
    let report = temp.path().join("report.json");

    cargo_bin_cmd!("order-budget")
        .args(["batch", "--quotes"])
        .arg(&quotes)
        .arg("--report-out")
        .arg(&report)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("cart-1: ok"))
        .stdout(predicate::str::contains("cart-2: Not enough order budget."))
        .stdout(predicate::str::contains("1 passed, 1 failed, 2 total"))
        .stderr(predicate::str::contains("1 of 2 quotes rejected"));

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report)?)?;
    assert_eq!(written["summary"]["failed"], 1);
    assert_eq!(written["quotes"][1]["code"], "not_enough_order_budget");
    Ok(())
}

#[test]
fn missing_quote_file_is_user_error() -> anyhow::Result<()> {
    let temp = tempdir()?;
    cargo_bin_cmd!("order-budget")
        .args(["check", "--quote"])
        .arg(temp.path().join("absent.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("quote file not found"));
    Ok(())
}

#[test]
fn empty_batch_is_user_error() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let quotes = temp.path().join("quotes.json");
    fs::write(&quotes, "[]")?;
    cargo_bin_cmd!("order-budget")
        .args(["batch", "--quotes"])
        .arg(&quotes)
        .assert()
        .code(2);
    Ok(())
}
