pub mod calculations;
pub mod calculator;
pub mod models;

pub use calculator::{CalculatorError, SalaryCalculator};
pub use models::*;
