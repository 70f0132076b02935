//! Inverse payroll calculation: net salary to gross salary.
//!
//! The forward calculation is piecewise linear (one slope below the insurable
//! income cap, another above it) and rounds every category to the cent, so no
//! closed form hits the target net exactly. The resolver starts from a
//! closed-form guess and corrects it against the forward calculation.
//!
//! # Algorithm
//!
//! 1. Guess below the cap: `net / (1 - employee rates - income tax rate)`.
//! 2. If that guess is above the cap, contributions are fixed at
//!    `cap × employee rates`, so solve
//!    `net = (gross - capped contributions) × (1 - income tax rate)` instead.
//! 3. Up to [`MAX_ITERATIONS`] times: run the forward calculation, stop once
//!    the net is within [`TOLERANCE`] of the target, otherwise step the gross
//!    by `difference / (1 - effective rate)` where the effective rate is the
//!    deduction share observed at the current guess.
//! 4. Round the final gross to the cent.
//!
//! The step uses the locally observed slope rather than a fixed derivative so
//! it stays valid on both sides of the cap.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::TaxConfig;
//! use salary_core::calculations::GrossResolver;
//!
//! let config = TaxConfig::bulgaria_2025();
//! let resolution = GrossResolver::new(&config).resolve(dec!(2327.94)).unwrap();
//!
//! assert_eq!(resolution.gross_salary, dec!(3000.00));
//! assert!(resolution.converged);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::calculations::common::round_half_up;
use crate::calculations::contributions::PayrollWorksheet;
use crate::models::TaxConfig;

/// Maximum number of correction steps after the closed-form guess.
pub const MAX_ITERATIONS: u32 = 10;

/// The resolver stops once the computed net is closer than one cent.
pub const TOLERANCE: Decimal = dec!(0.01);

/// Errors that can occur while resolving a gross salary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrossResolverError {
    /// A closed-form denominator is zero or negative, so the rates leave
    /// nothing of the gross salary to pay out.
    #[error("rates leave no net salary for year {year}: denominator {denominator} is not positive")]
    NonPositiveDenominator { year: i32, denominator: Decimal },

    /// The gross salary for this net salary does not fit in a `Decimal`.
    #[error("gross salary for year {year} is outside the supported range")]
    Overflow { year: i32 },
}

/// Outcome of resolving a gross salary from a net salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossResolution {
    /// Gross salary rounded to the cent.
    pub gross_salary: Decimal,

    /// Correction steps taken after the closed-form guess.
    pub iterations: u32,

    /// Whether the forward net came within [`TOLERANCE`] of the target.
    ///
    /// When `false` the last guess is returned anyway.
    pub converged: bool,
}

/// Resolves gross salaries for one tax year.
#[derive(Debug, Clone, Copy)]
pub struct GrossResolver<'a> {
    config: &'a TaxConfig,
}

impl<'a> GrossResolver<'a> {
    pub fn new(config: &'a TaxConfig) -> Self {
        Self { config }
    }

    /// Finds the gross salary whose forward calculation yields `net_salary`.
    ///
    /// # Errors
    ///
    /// Returns [`GrossResolverError::NonPositiveDenominator`] if the employee
    /// rates plus the income tax rate reach 1, or the income tax rate alone
    /// does when the guess lands above the cap.
    ///
    /// Returns [`GrossResolverError::Overflow`] if `net_salary` is so large
    /// that the gross salary or the employer cost leaves the `Decimal` range.
    pub fn resolve(
        &self,
        net_salary: Decimal,
    ) -> Result<GrossResolution, GrossResolverError> {
        if net_salary <= Decimal::ZERO {
            warn!(
                net_salary = %net_salary,
                year = self.config.year,
                "Net salary is zero or negative; resolved gross will be meaningless"
            );
        }

        let mut gross_salary = self.initial_guess(net_salary)?;
        debug!(
            net_salary = %net_salary,
            initial_guess = %gross_salary,
            year = self.config.year,
            "Resolving gross salary"
        );

        let worksheet = PayrollWorksheet::new(self.config);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < MAX_ITERATIONS {
            let computed = worksheet.calculate(gross_salary);
            let difference = net_salary - computed.net_salary;
            trace!(
                iteration = iterations,
                gross_salary = %gross_salary,
                computed_net = %computed.net_salary,
                difference = %difference,
                "Gross resolver step"
            );

            if difference.abs() < TOLERANCE {
                converged = true;
                break;
            }

            let Some(adjustment) = self.adjustment(difference, computed.net_salary, gross_salary)
            else {
                warn!(
                    gross_salary = %gross_salary,
                    computed_net = %computed.net_salary,
                    "Cannot derive a correction step at this gross salary; keeping current guess"
                );
                break;
            };
            gross_salary = self.checked_gross(gross_salary.checked_add(adjustment))?;
            iterations += 1;
        }

        if !converged {
            warn!(
                net_salary = %net_salary,
                gross_salary = %gross_salary,
                iterations,
                year = self.config.year,
                "Gross salary did not converge; returning last estimate"
            );
        }

        Ok(GrossResolution {
            gross_salary: round_half_up(gross_salary),
            iterations,
            converged,
        })
    }

    /// Closed-form first guess, switching formulas when it crosses the cap.
    fn initial_guess(
        &self,
        net_salary: Decimal,
    ) -> Result<Decimal, GrossResolverError> {
        let employee_rate = self.config.employee.total();
        let tax_rate = self.config.income_tax_rate;

        let below_cap_denominator = Decimal::ONE - employee_rate - tax_rate;
        let gross_salary = self.divide(net_salary, below_cap_denominator)?;

        if gross_salary <= self.config.max_insurable_income {
            return self.checked_gross(Some(gross_salary));
        }

        let capped_contributions = self.config.max_insurable_income * employee_rate;
        let after_tax = Decimal::ONE - tax_rate;
        let numerator = net_salary
            .checked_add(capped_contributions * after_tax)
            .ok_or(GrossResolverError::Overflow {
                year: self.config.year,
            })?;
        self.checked_gross(Some(self.divide(numerator, after_tax)?))
    }

    /// Accepts a gross salary only if the forward calculation can run on it.
    ///
    /// Employer contributions stay below the cap plus rounding, so the
    /// employer cost fits whenever `|gross| + cap + 1` does.
    fn checked_gross(
        &self,
        gross_salary: Option<Decimal>,
    ) -> Result<Decimal, GrossResolverError> {
        let margin = self
            .config
            .max_insurable_income
            .abs()
            .checked_add(Decimal::ONE);
        gross_salary
            .filter(|gross| {
                margin.is_some_and(|margin| gross.abs().checked_add(margin).is_some())
            })
            .ok_or(GrossResolverError::Overflow {
                year: self.config.year,
            })
    }

    fn divide(
        &self,
        numerator: Decimal,
        denominator: Decimal,
    ) -> Result<Decimal, GrossResolverError> {
        if denominator <= Decimal::ZERO {
            return Err(GrossResolverError::NonPositiveDenominator {
                year: self.config.year,
                denominator,
            });
        }
        numerator
            .checked_div(denominator)
            .ok_or(GrossResolverError::Overflow {
                year: self.config.year,
            })
    }

    /// Newton-like step: `difference / (1 - effective_rate)`, where
    /// `effective_rate = 1 - computed_net / gross`.
    ///
    /// Returns `None` when the observed slope is zero or undefined.
    fn adjustment(
        &self,
        difference: Decimal,
        computed_net: Decimal,
        gross_salary: Decimal,
    ) -> Option<Decimal> {
        let effective_rate = Decimal::ONE - computed_net.checked_div(gross_salary)?;
        difference.checked_div(Decimal::ONE - effective_rate)
    }
}

/// Resolves the gross salary for `net_salary` under `config`.
///
/// Shorthand for [`GrossResolver::resolve`].
pub fn resolve_gross_from_net(
    net_salary: Decimal,
    config: &TaxConfig,
) -> Result<GrossResolution, GrossResolverError> {
    GrossResolver::new(config).resolve(net_salary)
}
