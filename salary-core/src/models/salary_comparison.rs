use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SalaryCalculationResult;

/// The same gross salary computed under two configurations, with the deltas
/// going from `year_a` to `year_b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComparisonResult {
    pub year_a: SalaryCalculationResult,
    pub year_b: SalaryCalculationResult,

    /// Monthly `year_b` net minus `year_a` net.
    pub net_salary_difference: Decimal,
    pub annual_net_salary_difference: Decimal,

    /// Net salary change relative to `year_a`, in percent.
    pub percentage_change: Decimal,

    /// Monthly `year_b` employer cost minus `year_a` employer cost.
    pub employer_cost_difference: Decimal,
    pub annual_employer_cost_difference: Decimal,
}

impl SalaryComparisonResult {
    /// The gross salary both sides were computed from.
    pub fn gross_salary(&self) -> Decimal {
        self.year_a.gross_salary
    }
}
