//! Rate table loading for the salary engine.
//!
//! Rate tables let the calculator run with years other than the built-in
//! 2025 and 2026 rules, or with corrected rates for those years.

mod config_set;
mod loader;

pub use config_set::TaxConfigSet;
pub use loader::{TaxConfigLoader, TaxConfigLoaderError, TaxConfigRecord};
