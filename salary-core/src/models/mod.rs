mod product;
mod salary_calculation;
mod salary_comparison;
mod tax_config;

pub use product::Product;
pub use salary_calculation::{EmployeeContributions, EmployerContributions, SalaryCalculationResult};
pub use salary_comparison::SalaryComparisonResult;
pub use tax_config::{EmployeeRates, EmployerRates, TaxConfig, TaxConfigError};
