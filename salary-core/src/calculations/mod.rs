//! Payroll calculations for Bulgarian employment contracts.
//!
//! The contribution engine ([`PayrollWorksheet`]) turns a gross salary into a
//! full breakdown. The gross resolver inverts it, and the comparator runs one
//! gross salary through two tax years.

pub mod common;
pub mod comparison;
pub mod contributions;
pub mod gross_resolver;
pub mod purchasing_power;

pub use comparison::compare_across_configs;
pub use contributions::{PayrollWorksheet, compute_from_gross};
pub use gross_resolver::{
    GrossResolution, GrossResolver, GrossResolverError, MAX_ITERATIONS, TOLERANCE,
    resolve_gross_from_net,
};
pub use purchasing_power::{PurchasingPowerError, product_loss, product_losses};
