//! CSV batch input and output for salary comparisons.
//!
//! ## Input Format
//!
//! Headers are matched by name and column order does **not** matter.
//!
//! | Column | Required | Type | Notes |
//! |--------------|----------|---------|----------------------------------------|
//! | `net_salary` | yes | decimal | Monthly net in the first year, e.g. `4000.00` |
//! | `label` | no | string | Free text carried to the output row |
//!
//! `net_salary` follows the same rules as amounts on the command line: digits
//! with an optional comma separator and at most two decimals. The value is
//! kept exactly as written, so `4000.00` is echoed back as `4000.00`.
//!
//! ```csv
//! label,net_salary
//! junior,2327.94
//! senior,4000.00
//! ```
//!
//! ## Output Format
//!
//! One row per input row, in input order:
//!
//! `label, net_salary, gross_salary, net_salary_a, net_salary_b,
//! net_salary_difference, annual_net_salary_difference, percentage_change,
//! employer_cost_a, employer_cost_b, employer_cost_difference,
//! annual_employer_cost_difference`
use std::io::Write;
use std::path::Path;

use rust_decimal::Decimal;
use salary_core::{CalculatorError, SalaryCalculator, SalaryComparisonResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::{ParseAmountError, parse_amount};

// ---------------------------------------------------------------------------
// Serde-compatible rows that mirror the CSV layouts exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct InputRow {
    label: Option<String>,
    net_salary: String,
}

/// One validated input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub label: Option<String>,
    pub net_salary: Decimal,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    label: &'a str,
    net_salary: Decimal,
    gross_salary: Decimal,
    net_salary_a: Decimal,
    net_salary_b: Decimal,
    net_salary_difference: Decimal,
    annual_net_salary_difference: Decimal,
    percentage_change: Decimal,
    employer_cost_a: Decimal,
    employer_cost_b: Decimal,
    employer_cost_difference: Decimal,
    annual_employer_cost_difference: Decimal,
}

/// A compared input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub label: Option<String>,
    pub net_salary: Decimal,
    pub comparison: SalaryComparisonResult,
}

impl<'a> From<&'a BatchResult> for OutputRow<'a> {
    fn from(result: &'a BatchResult) -> Self {
        let comparison = &result.comparison;
        OutputRow {
            label: result.label.as_deref().unwrap_or(""),
            net_salary: result.net_salary,
            gross_salary: comparison.gross_salary(),
            net_salary_a: comparison.year_a.net_salary,
            net_salary_b: comparison.year_b.net_salary,
            net_salary_difference: comparison.net_salary_difference,
            annual_net_salary_difference: comparison.annual_net_salary_difference,
            percentage_change: comparison.percentage_change,
            employer_cost_a: comparison.year_a.total_employer_cost,
            employer_cost_b: comparison.year_b.total_employer_cost,
            employer_cost_difference: comparison.employer_cost_difference,
            annual_employer_cost_difference: comparison.annual_employer_cost_difference,
        }
    }
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while reading, comparing or writing a batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The CSV is structurally invalid or a column is missing.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based (header = row 0).
    #[error("net salary on row {row}: {source}")]
    InvalidSalary {
        row: usize,
        #[source]
        source: ParseAmountError,
    },

    #[error("row {row}: {source}")]
    Calculator {
        row: usize,
        #[source]
        source: CalculatorError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn check_row(
    row: InputRow,
    row_number: usize,
) -> Result<BatchRow, BatchError> {
    let net_salary = parse_amount(&row.net_salary).map_err(|source| BatchError::InvalidSalary {
        row: row_number,
        source,
    })?;
    Ok(BatchRow {
        label: row.label,
        net_salary,
    })
}

/// Parse CSV text and return the rows in file order.
///
/// # Errors
///
/// * [BatchError::Parse] – if the CSV is structurally invalid or the
///   `net_salary` column is missing.
/// * [BatchError::InvalidSalary] – if any `net_salary` cell is not a
///   positive amount with at most two decimals.
pub fn load_from_str(input: &str) -> Result<Vec<BatchRow>, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| check_row(result?, idx + 1))
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchRow>, BatchError> {
    let contents = std::fs::read_to_string(path)?;
    let rows = load_from_str(&contents)?;
    debug!(path = %path.display(), rows = rows.len(), "Loaded batch input");
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Comparing and writing
// ---------------------------------------------------------------------------

/// Compares every row with `calculator`, stopping at the first failure.
pub fn compare_rows(
    calculator: &SalaryCalculator,
    rows: Vec<BatchRow>,
) -> Result<Vec<BatchResult>, BatchError> {
    let results = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let comparison = calculator
                .compare(row.net_salary)
                .map_err(|source| BatchError::Calculator {
                    row: idx + 1,
                    source,
                })?;
            Ok(BatchResult {
                label: row.label,
                net_salary: row.net_salary,
                comparison,
            })
        })
        .collect::<Result<Vec<_>, BatchError>>()?;

    info!(rows = results.len(), "Compared batch");
    Ok(results)
}

/// Writes `results` as CSV with a header row.
pub fn write_results<W: Write>(
    writer: W,
    results: &[BatchResult],
) -> Result<(), BatchError> {
    let mut writer = csv::Writer::from_writer(writer);
    for result in results {
        writer.serialize(OutputRow::from(result))?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const LABELLED_CSV: &str = "\
label,net_salary
junior,2327.94
senior,4000.00
";

    // -----------------------------------------------------------------------
    // 1. Loading
    // -----------------------------------------------------------------------
    #[test]
    fn test_labelled_rows_parse_in_order() {
        let rows = load_from_str(LABELLED_CSV).expect("should parse");

        assert_eq!(
            rows,
            vec![
                BatchRow {
                    label: Some("junior".to_string()),
                    net_salary: dec!(2327.94),
                },
                BatchRow {
                    label: Some("senior".to_string()),
                    net_salary: dec!(4000.00),
                },
            ]
        );
    }

    #[test]
    fn test_label_column_is_optional() {
        let rows = load_from_str("net_salary\n1500\n").expect("should parse");

        assert_eq!(rows.len(), 1);
        assert!(rows[0].label.is_none());
        assert_eq!(rows[0].net_salary, dec!(1500));
    }

    #[test]
    fn test_whitespace_and_column_order_are_tolerated() {
        let rows = load_from_str("net_salary , label\n 2000.50 , mid \n").expect("should parse");

        assert_eq!(rows[0].label.as_deref(), Some("mid"));
        assert_eq!(rows[0].net_salary, dec!(2000.50));
    }

    #[test]
    fn test_missing_net_salary_column_returns_parse_error() {
        let result = load_from_str("label\njunior\n");

        assert!(matches!(result, Err(BatchError::Parse(_))));
    }

    #[test]
    fn test_non_numeric_salary_reports_row() {
        let result = load_from_str("net_salary\nlots\n");

        assert!(matches!(
            result,
            Err(BatchError::InvalidSalary {
                row: 1,
                source: ParseAmountError::InvalidFormat(_),
            })
        ));
    }

    #[test]
    fn test_non_positive_salary_reports_row() {
        let csv = "net_salary\n1000\n0\n";

        match load_from_str(csv) {
            Err(BatchError::InvalidSalary {
                row,
                source: ParseAmountError::NotPositive(value),
            }) => {
                assert_eq!(value, dec!(0));
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidSalary, got {:?}", other),
        }
    }

    #[test]
    fn test_scientific_notation_is_rejected() {
        let result = load_from_str("net_salary\n1e3\n");

        assert!(matches!(
            result,
            Err(BatchError::InvalidSalary {
                row: 1,
                source: ParseAmountError::InvalidFormat(_),
            })
        ));
    }

    #[test]
    fn test_third_decimal_place_is_rejected() {
        let result = load_from_str("net_salary\n1000.50\n1000.999\n");

        assert!(matches!(
            result,
            Err(BatchError::InvalidSalary {
                row: 2,
                source: ParseAmountError::InvalidFormat(_),
            })
        ));
    }

    #[test]
    fn test_salary_above_maximum_is_rejected() {
        let result = load_from_str("net_salary\n12345678901234567.89\n");

        assert!(matches!(
            result,
            Err(BatchError::InvalidSalary {
                row: 1,
                source: ParseAmountError::TooLarge(_),
            })
        ));
    }

    #[test]
    fn test_salary_keeps_written_precision() {
        let rows = load_from_str("net_salary\n\"1,234,567.89\"\n4000.00\n").expect("should parse");

        assert_eq!(rows[0].net_salary, dec!(1234567.89));
        assert_eq!(rows[1].net_salary.to_string(), "4000.00");
    }

    #[test]
    fn test_header_only_input_is_empty() {
        let rows = load_from_str("label,net_salary\n").expect("header-only CSV is valid");

        assert!(rows.is_empty());
    }

    // -----------------------------------------------------------------------
    // 2. Comparing
    // -----------------------------------------------------------------------
    #[test]
    fn test_compare_rows_matches_calculator() {
        let calculator = SalaryCalculator::default();
        let rows = load_from_str(LABELLED_CSV).unwrap();

        let results = compare_rows(&calculator, rows).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label.as_deref(), Some("junior"));
        assert_eq!(results[0].comparison.gross_salary(), dec!(3000.00));
        assert_eq!(results[0].comparison.net_salary_difference, dec!(-24.03));
        assert_eq!(results[1].comparison.gross_salary(), dec!(5013.55));
        assert_eq!(
            results[1].comparison.annual_employer_cost_difference,
            dec!(1679.76)
        );
    }

    // -----------------------------------------------------------------------
    // 3. Writing
    // -----------------------------------------------------------------------
    #[test]
    fn test_write_results_emits_header_and_rows() {
        let calculator = SalaryCalculator::default();
        let rows = load_from_str(LABELLED_CSV).unwrap();
        let results = compare_rows(&calculator, rows).unwrap();

        let mut buffer = Vec::new();
        write_results(&mut buffer, &results).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("label,net_salary,gross_salary,net_salary_a"));
        // Input amounts keep the precision they were read with.
        assert!(lines[2].starts_with("senior,4000.00,5013.55,4000.00,3904.86,-95.14,-1141.68,-2.38"));
    }

    #[test]
    fn test_write_results_leaves_missing_label_empty() {
        let calculator = SalaryCalculator::default();
        let rows = load_from_str("net_salary\n2327.94\n").unwrap();
        let results = compare_rows(&calculator, rows).unwrap();

        let mut buffer = Vec::new();
        write_results(&mut buffer, &results).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.lines().nth(1).unwrap().starts_with(",2327.94,"));
    }
}
