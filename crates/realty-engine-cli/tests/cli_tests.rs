//! End-to-end tests for the `realty` binary: flag, file and stdin input,
//! policy files, and each output format.

use assert_cmd::Command;
use predicates::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::io::Write;

fn realty() -> Command {
    Command::cargo_bin("realty").unwrap()
}

fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Decimals serialize as strings whose scale depends on the arithmetic.
fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn distribute_from_flags() {
    let value = json_stdout(realty().args([
        "distribute",
        "--cash",
        "250000",
        "--pref-rate",
        "0.08",
        "--gp-promote-percent",
        "20",
        "--total-lp-capital",
        "1000000",
    ]));
    assert_eq!(decimal(&value["result"]["lp_total"]), dec!(216000));
    assert_eq!(decimal(&value["result"]["gp_total"]), dec!(34000));
    assert_eq!(decimal(&value["result"]["breakdown"]["pref"]), dec!(80000));
    assert_eq!(value["warnings"].as_array().unwrap().len(), 0);
}

#[test]
fn distribute_negative_cash_via_flag() {
    let value = json_stdout(realty().args(["distribute", "--cash", "-5000"]));
    assert_eq!(decimal(&value["result"]["lp_total"]), dec!(0));
    let warnings = value["warnings"].as_array().unwrap();
    assert!(warnings
        .iter()
        .any(|w| w.as_str().unwrap().contains("distributable_cash")));
}

#[test]
fn distribute_requires_cash() {
    realty()
        .args(["distribute", "--pref-rate", "0.08"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--cash is required"));
}

#[test]
fn distribute_from_input_file() {
    let file = write_temp(
        r#"{"distributable_cash": 50000, "pref_rate": 0.08, "gp_promote_percent": 20, "total_lp_capital": 1000000}"#,
        ".json",
    );
    let value = json_stdout(realty().args(["distribute", "--input"]).arg(file.path()));
    assert_eq!(decimal(&value["result"]["lp_total"]), dec!(50000));
    assert_eq!(decimal(&value["result"]["gp_total"]), dec!(0));
}

#[test]
fn capital_stack_from_stdin() {
    let value = json_stdout(
        realty()
            .arg("capital-stack")
            .write_stdin(r#"{"purchase_price": 1000000, "ltv_percent": 70, "total_capex": 50000}"#),
    );
    assert_eq!(decimal(&value["result"]["debt_amount"]), dec!(700000.00));
    assert_eq!(decimal(&value["result"]["lp_equity"]), dec!(315000.0000));
}

#[test]
fn capital_stack_with_yaml_policy() {
    let policy = write_temp("default_ltv: \"0.60\"\ngp_equity_share: \"0.05\"\n", ".yaml");
    let value = json_stdout(
        realty()
            .args(["capital-stack", "--purchase-price", "1000000", "--policy"])
            .arg(policy.path()),
    );
    assert_eq!(decimal(&value["result"]["debt_amount"]), dec!(600000.00));
    assert!(value["warnings"][0]
        .as_str()
        .unwrap()
        .contains("ltv_percent"));
}

#[test]
fn invalid_policy_is_rejected() {
    let policy = write_temp(r#"{"default_pref_rate": "1.5"}"#, ".json");
    realty()
        .args(["distribute", "--cash", "100", "--policy"])
        .arg(policy.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_pref_rate"));
}

#[test]
fn underwrite_minimal_output() {
    realty()
        .args([
            "underwrite",
            "--noi",
            "80000",
            "--purchase-price",
            "1000000",
            "--output",
            "minimal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("8.00"));
}

#[test]
fn underwrite_text_values_collapse_to_zero() {
    let value = json_stdout(realty().args([
        "underwrite",
        "--purchase-price",
        "1000000",
        "--units",
        "forty",
    ]));
    assert_eq!(decimal(&value["result"]["price_per_unit"]), dec!(0));
}

#[test]
fn distribute_csv_output_flattens_breakdown() {
    realty()
        .args([
            "distribute",
            "--cash",
            "250000",
            "--total-lp-capital",
            "1000000",
            "--output",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("breakdown.promote,34000"))
        .stdout(predicate::str::contains("tiers.1.tier_name,Promote Split"));
}

#[test]
fn deal_requires_input() {
    realty()
        .arg("deal")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input <file.json> or stdin required"));
}

#[test]
fn deal_table_output() {
    let file = write_temp(
        r#"{
            "underwriting": {"purchase_price": 1000000, "noi": 80000},
            "capital_stack": {"purchase_price": 1000000, "ltv_percent": 70, "total_capex": 50000},
            "distributable_cash": 50000,
            "pref_rate": 0.08,
            "gp_promote_percent": 20
        }"#,
        ".json",
    );
    realty()
        .args(["deal", "--output", "table", "--input"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("distribution.lp_total"))
        .stdout(predicate::str::contains("Methodology: Deal Analysis"));
}

#[test]
fn version_prints_binary_name() {
    realty()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("realty "));
}
