use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`TaxConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxConfigError {
    /// The maximum insurable income must be positive.
    #[error("maximum insurable income must be positive, got {0}")]
    InvalidMaxInsurableIncome(Decimal),

    /// A single contribution or tax rate is outside `[0, 1)`.
    #[error("{name} rate must be in [0, 1), got {rate}")]
    InvalidRate { name: &'static str, rate: Decimal },

    /// Employee contributions plus income tax leave nothing of the gross salary.
    #[error("employee contributions ({employee_total}) plus income tax ({income_tax_rate}) must be below 1")]
    EmployeeDeductionsTooHigh {
        employee_total: Decimal,
        income_tax_rate: Decimal,
    },

    /// Employer contributions add up to the full contribution base or more.
    #[error("employer contributions must total below 1, got {0}")]
    EmployerContributionsTooHigh(Decimal),
}

/// Contribution rates withheld from the employee's gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRates {
    /// State pension fund.
    pub pension: Decimal,
    /// General illness and maternity fund.
    pub sickness: Decimal,
    pub unemployment: Decimal,
    /// Supplementary mandatory pension insurance.
    pub supplementary_pension: Decimal,
    pub health: Decimal,
}

impl EmployeeRates {
    /// Sum of all five employee rates.
    pub fn total(&self) -> Decimal {
        self.pension + self.sickness + self.unemployment + self.supplementary_pension + self.health
    }

    fn named(&self) -> [(&'static str, Decimal); 5] {
        [
            ("employee pension", self.pension),
            ("employee sickness", self.sickness),
            ("employee unemployment", self.unemployment),
            ("employee supplementary pension", self.supplementary_pension),
            ("employee health", self.health),
        ]
    }
}

/// Contribution rates paid by the employer on top of the gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerRates {
    pub pension: Decimal,
    pub sickness: Decimal,
    pub unemployment: Decimal,
    pub supplementary_pension: Decimal,
    /// Occupational accidents and diseases fund.
    pub occupational_accidents: Decimal,
    pub health: Decimal,
}

impl EmployerRates {
    /// Sum of all six employer rates.
    pub fn total(&self) -> Decimal {
        self.pension
            + self.sickness
            + self.unemployment
            + self.supplementary_pension
            + self.occupational_accidents
            + self.health
    }

    fn named(&self) -> [(&'static str, Decimal); 6] {
        [
            ("employer pension", self.pension),
            ("employer sickness", self.sickness),
            ("employer unemployment", self.unemployment),
            ("employer supplementary pension", self.supplementary_pension),
            ("employer occupational accidents", self.occupational_accidents),
            ("employer health", self.health),
        ]
    }
}

/// Rates and contribution cap for one payroll year.
///
/// All rates are fractions (`0.0658` for 6.58%). Amounts are in BGN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub year: i32,
    /// Ceiling on the monthly base used for social and health contributions.
    pub max_insurable_income: Decimal,
    pub employee: EmployeeRates,
    pub employer: EmployerRates,
    /// Flat personal income tax rate applied to taxable income.
    pub income_tax_rate: Decimal,
}

impl TaxConfig {
    /// Bulgarian payroll rules for 2025.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::TaxConfig;
    ///
    /// let config = TaxConfig::bulgaria_2025();
    ///
    /// assert_eq!(config.max_insurable_income, dec!(4130));
    /// assert_eq!(config.employee.total(), dec!(0.1378));
    /// ```
    pub fn bulgaria_2025() -> Self {
        Self {
            year: 2025,
            max_insurable_income: dec!(4130),
            employee: EmployeeRates {
                pension: dec!(0.0658),
                sickness: dec!(0.014),
                unemployment: dec!(0.004),
                supplementary_pension: dec!(0.022),
                health: dec!(0.032),
            },
            employer: EmployerRates {
                pension: dec!(0.0822),
                sickness: dec!(0.021),
                unemployment: dec!(0.006),
                supplementary_pension: dec!(0.028),
                occupational_accidents: dec!(0.004),
                health: dec!(0.048),
            },
            income_tax_rate: dec!(0.10),
        }
    }

    /// Bulgarian payroll rules for 2026.
    ///
    /// Pension rates go up by 0.89 points for the employee and 1.11 points for
    /// the employer, and the insurable income cap rises to 4600.
    pub fn bulgaria_2026() -> Self {
        let base = Self::bulgaria_2025();
        Self {
            year: 2026,
            max_insurable_income: dec!(4600),
            employee: EmployeeRates {
                pension: base.employee.pension + dec!(0.0089),
                ..base.employee
            },
            employer: EmployerRates {
                pension: base.employer.pension + dec!(0.0111),
                ..base.employer
            },
            income_tax_rate: base.income_tax_rate,
        }
    }

    /// Returns the built-in configuration for `year`, if there is one.
    pub fn canonical(year: i32) -> Option<Self> {
        match year {
            2025 => Some(Self::bulgaria_2025()),
            2026 => Some(Self::bulgaria_2026()),
            _ => None,
        }
    }

    /// Checks that the configuration can be used for both the forward and the
    /// inverse salary calculation.
    ///
    /// The engine itself never calls this; it computes whatever it is given.
    /// Loaders and front ends call it once at the input boundary.
    ///
    /// # Errors
    ///
    /// Returns [`TaxConfigError`] if:
    /// - `max_insurable_income` is not positive
    /// - any rate is outside `[0, 1)`
    /// - employee rates plus the income tax rate reach 1
    /// - employer rates reach 1
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::{TaxConfig, TaxConfigError};
    ///
    /// let mut config = TaxConfig::bulgaria_2025();
    /// config.income_tax_rate = dec!(0.9);
    ///
    /// assert!(matches!(
    ///     config.validate(),
    ///     Err(TaxConfigError::EmployeeDeductionsTooHigh { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), TaxConfigError> {
        if self.max_insurable_income <= Decimal::ZERO {
            return Err(TaxConfigError::InvalidMaxInsurableIncome(
                self.max_insurable_income,
            ));
        }

        let rates = self
            .employee
            .named()
            .into_iter()
            .chain(self.employer.named())
            .chain([("income tax", self.income_tax_rate)]);
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(TaxConfigError::InvalidRate { name, rate });
            }
        }

        let employee_total = self.employee.total();
        if employee_total + self.income_tax_rate >= Decimal::ONE {
            return Err(TaxConfigError::EmployeeDeductionsTooHigh {
                employee_total,
                income_tax_rate: self.income_tax_rate,
            });
        }

        let employer_total = self.employer.total();
        if employer_total >= Decimal::ONE {
            return Err(TaxConfigError::EmployerContributionsTooHigh(
                employer_total,
            ));
        }

        Ok(())
    }
}
