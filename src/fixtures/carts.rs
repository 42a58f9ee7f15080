//! Cart Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    basket::Cart,
    fixtures::{FixtureError, parse_currency, parse_price},
    items::CartLine,
};

/// Cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// ISO code of the cart currency
    pub currency: String,

    /// Lines in display order
    #[serde(default)]
    pub lines: Vec<CartLineFixture>,
}

/// Cart line in YAML
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product SKU
    pub sku: String,

    /// Product name
    pub name: String,

    /// Unit price (e.g., "45000 KES")
    pub price: String,

    /// Reference price before markdown
    #[serde(default)]
    pub original_price: Option<String>,

    /// Number of units
    pub quantity: u32,

    /// Known stock level
    #[serde(default)]
    pub stock: Option<u32>,
}

impl TryFrom<CartLineFixture> for CartLine<'static> {
    type Error = FixtureError;

    fn try_from(fixture: CartLineFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let mut line = CartLine::new(
            fixture.sku,
            fixture.name,
            Money::from_minor(minor_units, currency),
            fixture.quantity,
        )?;

        if let Some(original) = fixture.original_price {
            let (minor_units, currency) = parse_price(&original)?;

            line = line.with_original_price(Money::from_minor(minor_units, currency))?;
        }

        if let Some(stock) = fixture.stock {
            line = line.with_stock(stock)?;
        }

        Ok(line)
    }
}

impl TryFrom<CartFixture> for Cart<'static> {
    type Error = FixtureError;

    fn try_from(fixture: CartFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;

        let lines = fixture
            .lines
            .into_iter()
            .map(CartLine::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::with_lines(lines, currency)?)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::KES;
    use testresult::TestResult;

    use crate::{basket::CartError, items::CartLineError};

    use super::*;

    #[test]
    fn loads_cart_with_optional_fields() -> TestResult {
        let yaml = r#"
currency: KES
lines:
  - sku: MTB-001
    name: Hardtail 29er
    price: "45000 KES"
    original_price: "52000 KES"
    quantity: 1
    stock: 3
  - sku: HLM-010
    name: Trail Helmet
    price: "2500 KES"
    quantity: 2
"#;
        let fixture: CartFixture = serde_norway::from_str(yaml)?;
        let cart = Cart::try_from(fixture)?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal()?, Money::from_major(50_000, KES));
        assert_eq!(cart.original_subtotal()?, Money::from_major(57_000, KES));
        assert_eq!(cart.line("MTB-001").and_then(CartLine::stock), Some(3));

        Ok(())
    }

    #[test]
    fn quantity_above_stock_is_rejected() -> TestResult {
        let yaml = r#"
currency: KES
lines:
  - sku: HLM-010
    name: Trail Helmet
    price: "2500 KES"
    quantity: 5
    stock: 2
"#;
        let fixture: CartFixture = serde_norway::from_str(yaml)?;

        assert!(matches!(
            Cart::try_from(fixture),
            Err(FixtureError::CartLine(CartLineError::ExceedsStock(..)))
        ));

        Ok(())
    }

    #[test]
    fn line_in_other_currency_is_rejected() -> TestResult {
        let yaml = r#"
currency: KES
lines:
  - sku: LOCK
    name: D-Lock
    price: "30 USD"
    quantity: 1
"#;
        let fixture: CartFixture = serde_norway::from_str(yaml)?;

        assert!(matches!(
            Cart::try_from(fixture),
            Err(FixtureError::Cart(CartError::CurrencyMismatch(..)))
        ));

        Ok(())
    }
}
