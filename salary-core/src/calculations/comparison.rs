//! Year-over-year comparison at a fixed gross salary.
//!
//! The net salary given for the first year is resolved to a gross salary once.
//! That gross is then run through both configurations, so the deltas show what
//! the rate and cap changes alone do to the employee's net pay and the
//! employer's cost. Net pay is not held constant.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{annualize, percentage_of, round_half_up};
use crate::calculations::contributions::PayrollWorksheet;
use crate::calculations::gross_resolver::{GrossResolver, GrossResolverError};
use crate::models::{SalaryComparisonResult, TaxConfig};

/// Compares `net_salary_a` (earned under `config_a`) against what the same
/// gross salary pays under `config_b`.
///
/// # Errors
///
/// Returns [`GrossResolverError`] if the gross salary cannot be resolved
/// under `config_a`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::TaxConfig;
/// use salary_core::calculations::compare_across_configs;
///
/// let comparison = compare_across_configs(
///     dec!(4000),
///     &TaxConfig::bulgaria_2025(),
///     &TaxConfig::bulgaria_2026(),
/// )
/// .unwrap();
///
/// assert_eq!(comparison.gross_salary(), dec!(5013.55));
/// assert_eq!(comparison.net_salary_difference, dec!(-95.14));
/// assert_eq!(comparison.annual_net_salary_difference, dec!(-1141.68));
/// ```
pub fn compare_across_configs(
    net_salary_a: Decimal,
    config_a: &TaxConfig,
    config_b: &TaxConfig,
) -> Result<SalaryComparisonResult, GrossResolverError> {
    let resolution = GrossResolver::new(config_a).resolve(net_salary_a)?;
    let gross_salary = resolution.gross_salary;

    let year_a = PayrollWorksheet::new(config_a).calculate(gross_salary);
    let year_b = PayrollWorksheet::new(config_b).calculate(gross_salary);

    let net_salary_difference = round_half_up(year_b.net_salary - year_a.net_salary);
    let percentage_change = percentage_of(net_salary_difference, year_a.net_salary)
        .unwrap_or_else(|| {
            warn!(
                year = config_a.year,
                "Net salary is zero; percentage change reported as zero"
            );
            Decimal::ZERO
        });
    let employer_cost_difference =
        round_half_up(year_b.total_employer_cost - year_a.total_employer_cost);

    debug!(
        gross_salary = %gross_salary,
        from = config_a.year,
        to = config_b.year,
        net_salary_difference = %net_salary_difference,
        employer_cost_difference = %employer_cost_difference,
        "Compared salary across years"
    );

    Ok(SalaryComparisonResult {
        year_a,
        year_b,
        net_salary_difference,
        annual_net_salary_difference: annualize(net_salary_difference),
        percentage_change,
        employer_cost_difference,
        annual_employer_cost_difference: annualize(employer_cost_difference),
    })
}
