use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee contributions, each rounded to the cent on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeContributions {
    pub pension: Decimal,
    pub sickness: Decimal,
    pub unemployment: Decimal,
    pub supplementary_pension: Decimal,
    pub health: Decimal,
}

impl EmployeeContributions {
    /// Unrounded sum of the five category amounts.
    pub fn sum(&self) -> Decimal {
        self.pension + self.sickness + self.unemployment + self.supplementary_pension + self.health
    }
}

/// Employer contributions, each rounded to the cent on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    pub pension: Decimal,
    pub sickness: Decimal,
    pub unemployment: Decimal,
    pub supplementary_pension: Decimal,
    pub occupational_accidents: Decimal,
    pub health: Decimal,
}

impl EmployerContributions {
    /// Unrounded sum of the six category amounts.
    pub fn sum(&self) -> Decimal {
        self.pension
            + self.sickness
            + self.unemployment
            + self.supplementary_pension
            + self.occupational_accidents
            + self.health
    }
}

/// Full breakdown of one gross salary under one [`TaxConfig`](crate::TaxConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCalculationResult {
    /// The gross salary the breakdown was computed from.
    pub gross_salary: Decimal,

    /// Gross salary capped at the maximum insurable income.
    pub contribution_base: Decimal,

    pub employee_contributions: EmployeeContributions,
    pub total_employee_contributions: Decimal,

    /// Gross salary minus employee contributions, carried at full precision.
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub net_salary: Decimal,

    pub employer_contributions: EmployerContributions,
    pub total_employer_contributions: Decimal,

    /// Gross salary plus employer contributions.
    pub total_employer_cost: Decimal,
}
