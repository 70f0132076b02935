//! Command handlers for `salary-calc`.
//!
//! Each handler takes already-validated arguments and returns the text to
//! print, so `main` stays a thin dispatcher and the handlers can be tested
//! without spawning the binary.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use salary_core::calculations::{compute_from_gross, product_losses, resolve_gross_from_net};
use salary_core::{Product, SalaryCalculator};
use salary_data::{TaxConfigLoader, TaxConfigSet};
use tracing::{debug, info};

use crate::csv_loader;
use crate::report;

/// Which purchase to express a salary difference in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOption {
    /// Every product in the built-in catalog.
    Catalog,
    /// One catalog product, looked up by name.
    Product(String),
    /// An arbitrary unit price.
    Price(Decimal),
}

/// Built-in rules, overridden year by year by the optional rate table.
pub fn load_config_set(rates: Option<&Path>) -> Result<TaxConfigSet> {
    let mut set = TaxConfigSet::with_canonical();

    if let Some(path) = rates {
        let loaded = TaxConfigLoader::load_path(path)
            .with_context(|| format!("Failed to load rate table: {}", path.display()))?;
        info!(path = %path.display(), years = ?loaded.years(), "Using custom rate table");
        set.merge(loaded);
    }

    Ok(set)
}

/// Builds a calculator comparing year `from` against year `to`.
pub fn build_calculator(
    set: &TaxConfigSet,
    from: i32,
    to: i32,
) -> Result<SalaryCalculator> {
    let config_a = set
        .get(from)
        .with_context(|| format!("Cannot compare from {from}"))?;
    let config_b = set
        .get(to)
        .with_context(|| format!("Cannot compare to {to}"))?;

    debug!(from, to, "Built calculator");
    Ok(SalaryCalculator::new(config_a.clone(), config_b.clone()))
}

/// `compare`: the year-over-year view, followed by the purchasing power of
/// the annual difference.
pub fn run_compare(
    calculator: &SalaryCalculator,
    net_salary: Decimal,
    purchase: &PurchaseOption,
) -> Result<String> {
    let comparison = calculator
        .compare(net_salary)
        .context("Failed to compare salaries")?;
    let annual_difference = comparison.annual_net_salary_difference;

    let purchases = match purchase {
        PurchaseOption::Catalog => products_table(annual_difference)?,
        PurchaseOption::Product(name) => {
            let product = Product::find(name).with_context(|| {
                format!(
                    "Unknown product '{name}'; run `salary-calc products` to list the catalog"
                )
            })?;
            let count = calculator.product_loss(annual_difference, product.price)?;
            report::render_product_loss(annual_difference, &product.name, count)
        }
        PurchaseOption::Price(price) => {
            let count = calculator.product_loss(annual_difference, *price)?;
            let label = format!("items at {}", report::format_currency(*price));
            report::render_product_loss(annual_difference, &label, count)
        }
    };

    Ok(format!(
        "{}\n\n{}",
        report::render_comparison(
            &comparison,
            calculator.config_a().year,
            calculator.config_b().year
        ),
        purchases
    ))
}

/// `net`: full breakdown of a gross salary.
pub fn run_net(
    set: &TaxConfigSet,
    gross_salary: Decimal,
    year: i32,
) -> Result<String> {
    let config = set.get(year)?;
    let result = compute_from_gross(gross_salary, config);

    Ok(report::render_breakdown(&result, year))
}

/// `gross`: resolve the gross salary behind a net salary, then show its
/// breakdown.
pub fn run_gross(
    set: &TaxConfigSet,
    net_salary: Decimal,
    year: i32,
) -> Result<String> {
    let config = set.get(year)?;
    let resolution = resolve_gross_from_net(net_salary, config)
        .with_context(|| format!("Failed to resolve gross salary for {year}"))?;
    let breakdown = compute_from_gross(resolution.gross_salary, config);

    Ok(format!(
        "{}\n\n{}",
        report::render_resolution(net_salary, year, &resolution),
        report::render_breakdown(&breakdown, year)
    ))
}

/// `products`: what an annual difference buys across the catalog.
pub fn run_products(annual_difference: Decimal) -> Result<String> {
    products_table(annual_difference)
}

fn products_table(annual_difference: Decimal) -> Result<String> {
    let catalog = Product::catalog();
    let losses = product_losses(annual_difference, &catalog)?;
    Ok(report::render_product_table(annual_difference, &losses))
}

/// `batch`: compare every row of a CSV file. Writes CSV to `output` when
/// given, otherwise returns it for stdout.
pub fn run_batch(
    calculator: &SalaryCalculator,
    input: &Path,
    output: Option<&Path>,
) -> Result<String> {
    let rows = csv_loader::load_from_file(input)
        .with_context(|| format!("Failed to read batch file: {}", input.display()))?;
    let results = csv_loader::compare_rows(calculator, rows)
        .with_context(|| format!("Failed to compare rows in: {}", input.display()))?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            csv_loader::write_results(file, &results)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            Ok(format!(
                "Wrote {} comparisons to {}",
                results.len(),
                path.display()
            ))
        }
        None => {
            let mut buffer = Vec::new();
            csv_loader::write_results(&mut buffer, &results)?;
            let text = String::from_utf8(buffer).context("Batch output is not UTF-8")?;
            Ok(text.trim_end().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use salary_core::TaxConfig;

    // =========================================================================
    // Configuration
    // =========================================================================

    #[test]
    fn load_config_set_without_rates_is_canonical() {
        let set = load_config_set(None).unwrap();

        assert_eq!(set, TaxConfigSet::with_canonical());
    }

    #[test]
    fn load_config_set_reports_missing_file() {
        let result = load_config_set(Some(Path::new("/no/such/rates.toml")));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to load rate table"));
    }

    #[test]
    fn build_calculator_uses_requested_years() {
        let set = TaxConfigSet::with_canonical();

        let calculator = build_calculator(&set, 2026, 2025).unwrap();

        assert_eq!(calculator.config_a(), &TaxConfig::bulgaria_2026());
        assert_eq!(calculator.config_b(), &TaxConfig::bulgaria_2025());
    }

    #[test]
    fn build_calculator_rejects_unknown_year() {
        let set = TaxConfigSet::with_canonical();

        let result = build_calculator(&set, 2025, 2030);

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Cannot compare to 2030"));
        assert!(message.contains("no tax configuration for year 2030"));
    }

    // =========================================================================
    // Commands
    // =========================================================================

    #[test]
    fn run_compare_with_catalog_lists_products() {
        let calculator = SalaryCalculator::default();

        let text = run_compare(&calculator, dec!(4000), &PurchaseOption::Catalog).unwrap();

        assert!(text.contains("Salary comparison 2025 -> 2026"));
        assert!(text.contains("What 1,141.68 BGN a year buys"));
        assert!(text.contains("bread (2.00 BGN per loaf)"));
    }

    #[test]
    fn run_compare_with_named_product() {
        let calculator = SalaryCalculator::default();

        let text = run_compare(
            &calculator,
            dec!(4000),
            &PurchaseOption::Product("Eggs".to_string()),
        )
        .unwrap();

        assert!(text.ends_with("1,141.68 BGN a year is 3805 x eggs"));
    }

    #[test]
    fn run_compare_with_custom_price() {
        let calculator = SalaryCalculator::default();

        let text = run_compare(&calculator, dec!(4000), &PurchaseOption::Price(dec!(10))).unwrap();

        assert!(text.ends_with("1,141.68 BGN a year is 114 x items at 10.00 BGN"));
    }

    #[test]
    fn run_compare_rejects_unknown_product() {
        let calculator = SalaryCalculator::default();

        let result = run_compare(
            &calculator,
            dec!(4000),
            &PurchaseOption::Product("caviar".to_string()),
        );

        assert!(result.unwrap_err().to_string().contains("Unknown product 'caviar'"));
    }

    #[test]
    fn run_net_renders_breakdown() {
        let set = TaxConfigSet::with_canonical();

        let text = run_net(&set, dec!(3000), 2026).unwrap();

        assert!(text.starts_with("Salary breakdown for 2026"));
        assert!(text.contains("2,303.91 BGN"));
    }

    #[test]
    fn run_gross_renders_resolution_and_breakdown() {
        let set = TaxConfigSet::with_canonical();

        let text = run_gross(&set, dec!(2327.94), 2025).unwrap();

        assert!(text.contains("Gross salary for a net of 2,327.94 BGN in 2025"));
        assert!(text.contains("3,000.00 BGN"));
        assert!(text.contains("Salary breakdown for 2025"));
    }

    #[test]
    fn run_gross_rejects_unknown_year() {
        let set = TaxConfigSet::with_canonical();

        assert!(run_gross(&set, dec!(1000), 2024).is_err());
    }

    #[test]
    fn run_products_covers_whole_catalog() {
        let text = run_products(dec!(-1200)).unwrap();

        assert_eq!(text.lines().count(), Product::catalog().len() + 1);
        assert!(text.contains("coffee"));
    }
}
