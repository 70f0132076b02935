use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// An everyday purchase used to express a salary change in goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// What one unit is ("loaf", "litre", "kg").
    pub unit: String,
    /// Price of one unit in BGN.
    pub price: Decimal,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            price,
        }
    }

    /// Common Bulgarian grocery and fuel prices.
    pub fn catalog() -> Vec<Product> {
        vec![
            Product::new("bread", "loaf", dec!(2.00)),
            Product::new("milk", "litre", dec!(3.10)),
            Product::new("coffee", "cup", dec!(2.50)),
            Product::new("eggs", "egg", dec!(0.30)),
            Product::new("petrol", "litre", dec!(2.60)),
            Product::new("kozunak", "loaf", dec!(8.00)),
            Product::new("ayran", "bottle", dec!(2.50)),
            Product::new("pork", "kg", dec!(11.20)),
            Product::new("potatoes", "kg", dec!(2.00)),
            Product::new("tomatoes", "kg", dec!(4.30)),
        ]
    }

    /// Looks up a catalog product by name, ignoring case.
    pub fn find(name: &str) -> Option<Product> {
        let name = name.trim();
        Self::catalog()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn catalog_has_ten_priced_products() {
        let catalog = Product::catalog();

        assert_eq!(catalog.len(), 10);
        assert!(catalog.iter().all(|p| p.price > Decimal::ZERO));
    }

    #[test]
    fn find_ignores_case_and_whitespace() {
        let product = Product::find("  Bread ").unwrap();

        assert_eq!(product.price, dec!(2.00));
        assert_eq!(product.unit, "loaf");
    }

    #[test]
    fn find_returns_none_for_unknown_product() {
        assert_eq!(Product::find("caviar"), None);
    }
}
