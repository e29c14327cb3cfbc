//! E2E tests for the command line

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::process::{Command, Output};
use std::str::FromStr;

fn cgtcalc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cgtcalc"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn json_amount(value: &serde_json::Value, key: &str) -> Decimal {
    let raw = value[key].as_str().unwrap_or_else(|| panic!("{key} missing"));
    Decimal::from_str(raw).unwrap()
}

/// Text summary for the worked example request
#[test]
fn calculate_summary() {
    let output = cgtcalc(&["calculate", "-r", "tests/data/scenario_a.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("CAPITAL GAINS TAX ESTIMATE (2025-2026)"));
    assert!(stdout.contains("1 July 2025 to 30 June 2026 | Amounts in AUD"));
    assert!(stdout.contains("Estimated tax on gain: $25,092"));
    assert!(stdout.contains("Net capital gain: $75,000.00"));
    assert!(stdout.contains("Income tax on gain: $24,600.00"));
    assert!(stdout.contains("$492.00"));
    assert!(stdout.contains("TOTAL TAX LIABILITY: $25,092.00"));
}

/// JSON output carries every result field
#[test]
fn calculate_json() {
    let output = cgtcalc(&["calculate", "-r", "tests/data/scenario_a.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["incomeYear"], "2025-2026");
    assert_eq!(json["assetBreakdown"][0]["assetId"], "shares");
    assert_eq!(json["assetBreakdown"][0]["isLoss"], false);
    assert_eq!(json_amount(&json, "netCapitalGain"), dec!(75000));
    assert_eq!(json_amount(&json, "taxWithoutGain"), dec!(17788));
    assert_eq!(json_amount(&json, "taxWithGain"), dec!(42388));
    assert_eq!(json_amount(&json, "cgtPayable"), dec!(24600));
    assert_eq!(json_amount(&json, "medicareLevy"), dec!(492));
    assert_eq!(json_amount(&json, "totalTaxLiability"), dec!(25092));
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

/// Flags override the request file
#[test]
fn calculate_flags_override_request() {
    let output = cgtcalc(&[
        "calculate",
        "-r",
        "tests/data/scenario_a.json",
        "--foreign",
        "--income",
        "0",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json_amount(&json, "netCapitalGain"), dec!(150000));
    assert_eq!(json_amount(&json, "taxableIncomeWithGain"), dec!(150000));
}

/// Assets from CSV with prior losses given as formatted text
#[test]
fn calculate_from_assets_csv() {
    let output = cgtcalc(&[
        "calculate",
        "-a",
        "tests/data/assets.csv",
        "--income",
        "60,000",
        "--prior-losses",
        "3,000",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json_amount(&json, "discountedGainsTotal"), dec!(10000));
    assert_eq!(json_amount(&json, "lossesAvailable"), dec!(8000));
    assert_eq!(json_amount(&json, "netCapitalGain"), dec!(2000));
    assert_eq!(json_amount(&json, "lossCarryForward"), Decimal::ZERO);
}

/// Breakdown CSV keeps asset order
#[test]
fn breakdown_csv() {
    let output = cgtcalc(&["breakdown", "-a", "tests/data/assets.csv", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "row_num,asset,proceeds,cost_base,capital_gain,discounted_gain,loss"
    );
    assert_eq!(lines[1], "1,shares,30000.00,10000.00,20000.00,10000.00,");
    assert_eq!(lines[2], "2,car-park,5000.00,10000.00,0.00,0.00,5000.00");
}

/// Breakdown table output
#[test]
fn breakdown_table() {
    let output = cgtcalc(&["breakdown", "-r", "tests/data/scenario_a.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Discounted Gain"));
    assert!(stdout.contains("shares"));
    assert!(stdout.contains("$75,000.00"));
}

/// Request read from stdin
#[test]
fn calculate_from_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_cgtcalc"))
        .args(["calculate", "-r", "-", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"annualTaxableIncome": 90000, "assets": [{"purchasePrice": 0, "salePrice": 2000}]}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["assetBreakdown"][0]["assetId"], "asset-1");
    assert_eq!(json_amount(&json, "netCapitalGain"), dec!(1000));
}

/// Unsupported years are rejected before calculating
#[test]
fn rejects_unknown_year() {
    let output = cgtcalc(&["calculate", "--year", "2019-2020"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unsupported income year"));
}

/// Bracket table for an earlier year under both policies
#[test]
fn brackets_per_year() {
    let output = cgtcalc(&["brackets", "--year", "2023-2024"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Stage 3 rates"));
    assert!(stdout.contains("1 July 2023 to 30 June 2024"));
    assert!(stdout.contains("--brackets per-year"));
    assert!(stdout.contains("16%"));

    let output = cgtcalc(&["brackets", "--year", "2023-2024", "--brackets", "per-year"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Pre Stage 3 rates"));
    assert!(stdout.contains("32.5%"));
}

/// JSON schema and CSV documentation
#[test]
fn schema_formats() {
    let output = cgtcalc(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("annualTaxableIncome"));
    assert!(stdout.contains("ownedMoreThan12Months"));

    let output = cgtcalc(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "id,purchase_price,additional_costs,sale_price,held_over_12_months,purchase_date,sale_date"
    );

    let output = cgtcalc(&["schema", "csv-fields"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("purchase_price"));
    assert!(stdout.contains("required"));
}
