//! Integration tests that exercise the batch loader and the batch command
//! against an on-disk fixture file.
//!
//! These complement the unit tests inside csv_loader.rs (which all use
//! inline string literals) by verifying that the full read-from-disk path
//! works end-to-end.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use salary_cli::{app, csv_loader};
use salary_core::SalaryCalculator;

/// Path to the sample CSV shipped with the test fixtures.
fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_salaries.csv")
}

fn compared_fixture() -> Vec<csv_loader::BatchResult> {
    let rows = csv_loader::load_from_file(&fixture_path()).expect("fixture file should load");
    csv_loader::compare_rows(&SalaryCalculator::default(), rows).expect("fixture rows compare")
}

#[test]
fn test_load_fixture_file_succeeds() {
    let rows = csv_loader::load_from_file(&fixture_path()).expect("fixture file should load");

    // The fixture has exactly 3 rows.
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].label.as_deref(), Some("junior"));
    assert_eq!(rows[2].net_salary, dec!(5000));
}

#[test]
fn test_fixture_first_row_below_both_caps() {
    let results = compared_fixture();
    let comparison = &results[0].comparison;

    assert_eq!(comparison.gross_salary(), dec!(3000.00));
    assert_eq!(comparison.year_b.net_salary, dec!(2303.91));
    assert_eq!(comparison.net_salary_difference, dec!(-24.03));
    assert_eq!(comparison.percentage_change, dec!(-1.03));
    assert_eq!(comparison.year_b.total_employer_cost, dec!(3600.90));
    assert_eq!(comparison.employer_cost_difference, dec!(33.30));
}

#[test]
fn test_fixture_second_row_above_both_caps() {
    let results = compared_fixture();
    let comparison = &results[1].comparison;

    assert_eq!(comparison.gross_salary(), dec!(5013.55));
    assert_eq!(comparison.year_a.total_employer_cost, dec!(5794.95));
    assert_eq!(comparison.year_b.total_employer_cost, dec!(5934.93));
    assert_eq!(comparison.annual_net_salary_difference, dec!(-1141.68));
}

#[test]
fn test_fixture_rows_above_both_caps_lose_the_same_amount() {
    let results = compared_fixture();
    let senior = &results[1].comparison;
    let lead = &results[2].comparison;

    assert_eq!(lead.gross_salary(), dec!(6124.67));
    assert_eq!(lead.year_b.net_salary, dec!(4904.86));
    assert_eq!(lead.net_salary_difference, senior.net_salary_difference);
    assert_eq!(lead.employer_cost_difference, senior.employer_cost_difference);
    assert_eq!(lead.percentage_change, dec!(-1.90));
}

#[test]
fn test_run_batch_prints_csv_without_output_path() {
    let calculator = SalaryCalculator::default();

    let text = app::run_batch(&calculator, &fixture_path(), None).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("label,net_salary,gross_salary"));
    assert!(lines[3].starts_with("lead,5000,6124.67,5000.00,4904.86,-95.14,-1141.68,-1.90"));
}

#[test]
fn test_run_batch_writes_output_file() {
    let calculator = SalaryCalculator::default();
    let output = std::env::temp_dir().join(format!(
        "salary-batch-{}.csv",
        std::process::id()
    ));

    let summary = app::run_batch(&calculator, &fixture_path(), Some(&output)).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    std::fs::remove_file(&output).unwrap();

    assert!(summary.starts_with("Wrote 3 comparisons to"));
    assert_eq!(written.lines().count(), 4);
}

#[test]
fn test_run_batch_reports_missing_file() {
    let calculator = SalaryCalculator::default();

    let result = app::run_batch(&calculator, Path::new("/no/such/batch.csv"), None);

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to read batch file"));
}
