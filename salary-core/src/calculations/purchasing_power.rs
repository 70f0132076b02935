//! Expresses an annual salary difference as a count of everyday products.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use crate::models::Product;

/// Errors that can occur when converting money into product counts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PurchasingPowerError {
    /// A product must cost something for the count to be finite.
    #[error("product price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    /// The count does not fit in a `u64`.
    #[error("product count for {annual_difference} at {product_price} is out of range")]
    Overflow {
        annual_difference: Decimal,
        product_price: Decimal,
    },
}

/// Number of whole products that `annual_difference` would have bought.
///
/// The sign of the difference is ignored, so a loss and a gain of the same
/// size give the same count.
///
/// # Errors
///
/// Returns [`PurchasingPowerError::NonPositivePrice`] if `product_price` is
/// zero or negative.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::product_loss;
///
/// assert_eq!(product_loss(dec!(-1200), dec!(2.5)), Ok(480));
/// assert_eq!(product_loss(dec!(-100), dec!(30)), Ok(3));
/// ```
pub fn product_loss(
    annual_difference: Decimal,
    product_price: Decimal,
) -> Result<u64, PurchasingPowerError> {
    if product_price <= Decimal::ZERO {
        return Err(PurchasingPowerError::NonPositivePrice(product_price));
    }

    (annual_difference.abs() / product_price)
        .floor()
        .to_u64()
        .ok_or(PurchasingPowerError::Overflow {
            annual_difference,
            product_price,
        })
}

/// Product counts for every entry in `products`, in the same order.
///
/// # Errors
///
/// Fails on the first product whose count cannot be computed.
pub fn product_losses<'p>(
    annual_difference: Decimal,
    products: &'p [Product],
) -> Result<Vec<(&'p Product, u64)>, PurchasingPowerError> {
    products
        .iter()
        .map(|product| Ok((product, product_loss(annual_difference, product.price)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn product_loss_divides_annual_difference_by_price() {
        assert_eq!(product_loss(dec!(-1200), dec!(2.5)), Ok(480));
    }

    #[test]
    fn product_loss_handles_different_prices() {
        let annual_difference = dec!(-600);

        assert_eq!(product_loss(annual_difference, dec!(3)), Ok(200));
        assert_eq!(product_loss(annual_difference, dec!(10)), Ok(60));
        assert_eq!(product_loss(annual_difference, dec!(25)), Ok(24));
    }

    #[test]
    fn product_loss_floors_partial_products() {
        // 100 / 30 = 3.33...
        assert_eq!(product_loss(dec!(-100), dec!(30)), Ok(3));
    }

    #[test]
    fn product_loss_handles_zero_difference() {
        assert_eq!(product_loss(dec!(0), dec!(10)), Ok(0));
    }

    #[test]
    fn product_loss_ignores_sign() {
        assert_eq!(product_loss(dec!(-100), dec!(10)), Ok(10));
        assert_eq!(product_loss(dec!(100), dec!(10)), Ok(10));
    }

    #[test]
    fn product_loss_rejects_zero_price() {
        assert_eq!(
            product_loss(dec!(-100), dec!(0)),
            Err(PurchasingPowerError::NonPositivePrice(dec!(0)))
        );
    }

    #[test]
    fn product_loss_rejects_negative_price() {
        assert_eq!(
            product_loss(dec!(-100), dec!(-2.5)),
            Err(PurchasingPowerError::NonPositivePrice(dec!(-2.5)))
        );
    }

    #[test]
    fn product_losses_covers_whole_catalog() {
        let catalog = Product::catalog();

        let losses = product_losses(dec!(-1141.68), &catalog).unwrap();

        assert_eq!(losses.len(), catalog.len());
        // 1141.68 / 2.00 = 570.84
        assert_eq!(losses[0].0.name, "bread");
        assert_eq!(losses[0].1, 570);
        // 1141.68 / 0.30 = 3805.6
        assert_eq!(losses[3].0.name, "eggs");
        assert_eq!(losses[3].1, 3805);
    }

    #[test]
    fn product_losses_fails_on_bad_price() {
        let products = vec![
            Product::new("bread", "loaf", dec!(2.00)),
            Product::new("free sample", "piece", dec!(0)),
        ];

        let result = product_losses(dec!(-100), &products);

        assert_eq!(result, Err(PurchasingPowerError::NonPositivePrice(dec!(0))));
    }
}
