//! Forward payroll calculation: gross salary to the full contribution breakdown.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Contribution base: gross salary capped at the maximum insurable income |
//! | 2    | Each employee category: base × rate, rounded to the cent |
//! | 3    | Employee total: sum of the rounded categories, rounded |
//! | 4    | Taxable income: gross − employee total (not rounded) |
//! | 5    | Income tax: taxable income × tax rate, rounded |
//! | 6    | Net salary: taxable income − income tax, rounded |
//! | 7    | Each employer category: base × rate, rounded to the cent |
//! | 8    | Employer total: sum of the rounded categories, rounded |
//! | 9    | Employer cost: gross + employer total, rounded |
//!
//! Every category is rounded on its own before summing. Rounding the totals
//! only would drift by a few cents from the reference figures.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::TaxConfig;
//! use salary_core::calculations::PayrollWorksheet;
//!
//! let config = TaxConfig::bulgaria_2025();
//! let result = PayrollWorksheet::new(&config).calculate(dec!(5000));
//!
//! assert_eq!(result.contribution_base, dec!(4130));
//! assert_eq!(result.total_employee_contributions, dec!(569.11));
//! assert_eq!(result.net_salary, dec!(3987.80));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{
    EmployeeContributions, EmployerContributions, SalaryCalculationResult, TaxConfig,
};

/// Calculator for the forward payroll breakdown of one tax year.
#[derive(Debug, Clone, Copy)]
pub struct PayrollWorksheet<'a> {
    config: &'a TaxConfig,
}

impl<'a> PayrollWorksheet<'a> {
    pub fn new(config: &'a TaxConfig) -> Self {
        Self { config }
    }

    /// Computes the full breakdown for `gross_salary`.
    ///
    /// Never fails. A zero or negative gross salary yields a degenerate but
    /// well-defined result and a warning; callers should reject such input
    /// before getting here.
    pub fn calculate(
        &self,
        gross_salary: Decimal,
    ) -> SalaryCalculationResult {
        if gross_salary <= Decimal::ZERO {
            warn!(
                gross_salary = %gross_salary,
                year = self.config.year,
                "Gross salary is zero or negative; breakdown will be meaningless"
            );
        }

        let contribution_base = self.contribution_base(gross_salary);

        let employee_contributions = self.employee_contributions(contribution_base);
        let total_employee_contributions = round_half_up(employee_contributions.sum());

        let taxable_income = gross_salary - total_employee_contributions;
        let income_tax = self.income_tax(taxable_income);
        let net_salary = round_half_up(taxable_income - income_tax);

        let employer_contributions = self.employer_contributions(contribution_base);
        let total_employer_contributions = round_half_up(employer_contributions.sum());
        let total_employer_cost = round_half_up(gross_salary + total_employer_contributions);

        SalaryCalculationResult {
            gross_salary,
            contribution_base,
            employee_contributions,
            total_employee_contributions,
            taxable_income,
            income_tax,
            net_salary,
            employer_contributions,
            total_employer_contributions,
            total_employer_cost,
        }
    }

    /// Caps the gross salary at the maximum insurable income.
    ///
    /// Above the cap contribution amounts stop growing, while income tax keeps
    /// following the gross salary.
    fn contribution_base(
        &self,
        gross_salary: Decimal,
    ) -> Decimal {
        gross_salary.min(self.config.max_insurable_income)
    }

    fn employee_contributions(
        &self,
        base: Decimal,
    ) -> EmployeeContributions {
        let rates = &self.config.employee;
        EmployeeContributions {
            pension: contribution(base, rates.pension),
            sickness: contribution(base, rates.sickness),
            unemployment: contribution(base, rates.unemployment),
            supplementary_pension: contribution(base, rates.supplementary_pension),
            health: contribution(base, rates.health),
        }
    }

    fn employer_contributions(
        &self,
        base: Decimal,
    ) -> EmployerContributions {
        let rates = &self.config.employer;
        EmployerContributions {
            pension: contribution(base, rates.pension),
            sickness: contribution(base, rates.sickness),
            unemployment: contribution(base, rates.unemployment),
            supplementary_pension: contribution(base, rates.supplementary_pension),
            occupational_accidents: contribution(base, rates.occupational_accidents),
            health: contribution(base, rates.health),
        }
    }

    fn income_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        round_half_up(taxable_income * self.config.income_tax_rate)
    }
}

fn contribution(
    base: Decimal,
    rate: Decimal,
) -> Decimal {
    round_half_up(base * rate)
}

/// Computes the full breakdown of `gross_salary` under `config`.
///
/// Shorthand for [`PayrollWorksheet::calculate`].
pub fn compute_from_gross(
    gross_salary: Decimal,
    config: &TaxConfig,
) -> SalaryCalculationResult {
    PayrollWorksheet::new(config).calculate(gross_salary)
}
