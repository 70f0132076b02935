use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::{
    GrossResolution, GrossResolver, GrossResolverError, PayrollWorksheet, PurchasingPowerError,
    compare_across_configs, product_loss,
};
use crate::models::{SalaryCalculationResult, SalaryComparisonResult, TaxConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("no tax configuration for year {0}")]
    UnknownYear(i32),

    #[error(transparent)]
    Resolver(#[from] GrossResolverError),
}

/// Immutable pair of tax years to compare, built explicitly by the caller.
///
/// `config_a` is the year the user's net salary is known for; `config_b` is
/// the year it is compared against. [`Default`] holds the Bulgarian 2025 and
/// 2026 rules.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::SalaryCalculator;
///
/// let calculator = SalaryCalculator::default();
/// let comparison = calculator.compare(dec!(2000)).unwrap();
///
/// assert!(comparison.net_salary_difference < dec!(0));
/// assert!(comparison.employer_cost_difference > dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryCalculator {
    config_a: TaxConfig,
    config_b: TaxConfig,
}

impl SalaryCalculator {
    pub fn new(
        config_a: TaxConfig,
        config_b: TaxConfig,
    ) -> Self {
        Self { config_a, config_b }
    }

    pub fn config_a(&self) -> &TaxConfig {
        &self.config_a
    }

    pub fn config_b(&self) -> &TaxConfig {
        &self.config_b
    }

    /// Returns the held configuration for `year`, checking `config_a` first.
    pub fn config(
        &self,
        year: i32,
    ) -> Option<&TaxConfig> {
        [&self.config_a, &self.config_b]
            .into_iter()
            .find(|config| config.year == year)
    }

    fn require_config(
        &self,
        year: i32,
    ) -> Result<&TaxConfig, CalculatorError> {
        self.config(year).ok_or(CalculatorError::UnknownYear(year))
    }

    /// Compares a net salary earned under `config_a` with what the same gross
    /// salary pays under `config_b`.
    pub fn compare(
        &self,
        net_salary: Decimal,
    ) -> Result<SalaryComparisonResult, CalculatorError> {
        Ok(compare_across_configs(
            net_salary,
            &self.config_a,
            &self.config_b,
        )?)
    }

    /// Full breakdown of `gross_salary` under the held configuration for `year`.
    pub fn net_from_gross(
        &self,
        gross_salary: Decimal,
        year: i32,
    ) -> Result<SalaryCalculationResult, CalculatorError> {
        let config = self.require_config(year)?;
        Ok(PayrollWorksheet::new(config).calculate(gross_salary))
    }

    /// Resolves the gross salary for `net_salary` under the held configuration
    /// for `year`.
    pub fn gross_from_net(
        &self,
        net_salary: Decimal,
        year: i32,
    ) -> Result<GrossResolution, CalculatorError> {
        let config = self.require_config(year)?;
        Ok(GrossResolver::new(config).resolve(net_salary)?)
    }

    /// See [`product_loss`].
    pub fn product_loss(
        &self,
        annual_difference: Decimal,
        product_price: Decimal,
    ) -> Result<u64, PurchasingPowerError> {
        product_loss(annual_difference, product_price)
    }
}

impl Default for SalaryCalculator {
    fn default() -> Self {
        Self::new(TaxConfig::bulgaria_2025(), TaxConfig::bulgaria_2026())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_holds_2025_and_2026() {
        let calculator = SalaryCalculator::default();

        assert_eq!(calculator.config_a().year, 2025);
        assert_eq!(calculator.config_b().year, 2026);
    }

    #[test]
    fn config_looks_up_by_year() {
        let calculator = SalaryCalculator::default();

        assert_eq!(calculator.config(2025).unwrap().max_insurable_income, dec!(4130));
        assert_eq!(calculator.config(2026).unwrap().max_insurable_income, dec!(4600));
        assert!(calculator.config(2027).is_none());
    }

    #[test]
    fn compare_matches_free_function() {
        let calculator = SalaryCalculator::default();

        let comparison = calculator.compare(dec!(4000)).unwrap();
        let expected = compare_across_configs(
            dec!(4000),
            &TaxConfig::bulgaria_2025(),
            &TaxConfig::bulgaria_2026(),
        )
        .unwrap();

        assert_eq!(comparison, expected);
    }

    #[test]
    fn compare_accepts_custom_configs() {
        let mut config_b = TaxConfig::bulgaria_2026();
        config_b.year = 2027;
        config_b.income_tax_rate = dec!(0.12);
        let calculator = SalaryCalculator::new(TaxConfig::bulgaria_2025(), config_b);

        let comparison = calculator.compare(dec!(2327.94)).unwrap();

        assert_eq!(comparison.year_b.gross_salary, dec!(3000.00));
        // (3000 - 440.10) × 0.12 = 307.188
        assert_eq!(comparison.year_b.income_tax, dec!(307.19));
        assert_eq!(comparison.year_b.net_salary, dec!(2252.71));
    }

    #[test]
    fn net_from_gross_uses_requested_year() {
        let calculator = SalaryCalculator::default();

        let result = calculator.net_from_gross(dec!(3000), 2026).unwrap();

        assert_eq!(result.net_salary, dec!(2303.91));
    }

    #[test]
    fn net_from_gross_rejects_unknown_year() {
        let calculator = SalaryCalculator::default();

        assert_eq!(
            calculator.net_from_gross(dec!(3000), 2024),
            Err(CalculatorError::UnknownYear(2024))
        );
    }

    #[test]
    fn gross_from_net_uses_requested_year() {
        let calculator = SalaryCalculator::default();

        let resolution = calculator.gross_from_net(dec!(2327.94), 2025).unwrap();

        assert_eq!(resolution.gross_salary, dec!(3000.00));
    }

    #[test]
    fn gross_from_net_wraps_resolver_errors() {
        let mut config = TaxConfig::bulgaria_2025();
        config.income_tax_rate = dec!(0.9);
        let calculator = SalaryCalculator::new(config, TaxConfig::bulgaria_2026());

        let result = calculator.gross_from_net(dec!(1000), 2025);

        assert!(matches!(result, Err(CalculatorError::Resolver(_))));
    }

    #[test]
    fn compare_reports_overflow_instead_of_panicking() {
        let calculator = SalaryCalculator::default();

        assert_eq!(
            calculator.compare(Decimal::MAX),
            Err(CalculatorError::Resolver(GrossResolverError::Overflow {
                year: 2025
            }))
        );
    }

    #[test]
    fn product_loss_passes_through() {
        let calculator = SalaryCalculator::default();

        assert_eq!(calculator.product_loss(dec!(-1200), dec!(2.5)), Ok(480));
    }
}
