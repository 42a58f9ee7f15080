//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    items::{CartLine, CartLineError},
    pricing::{TotalPriceError, total_price},
};

/// Errors related to cart construction or updates.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A line's currency differs from the cart currency (sku, line currency, cart currency).
    #[error("Line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// No line with the given SKU exists.
    #[error("No line for {0} in cart")]
    UnknownSku(String),

    /// Wrapped line validation error.
    #[error(transparent)]
    Line(#[from] CartLineError),

    /// Wrapped total price error.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// An ordered, single-currency shopping cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given lines.
    ///
    /// Lines sharing a SKU are merged.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if there was a currency mismatch or a merged line exceeds stock.
    pub fn with_lines(
        lines: impl IntoIterator<Item = CartLine<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let mut cart = Cart::new(currency);

        lines.into_iter().try_for_each(|line| cart.add_line(line))?;

        Ok(cart)
    }

    /// Add a line, merging it into an existing line with the same SKU.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` on currency mismatch or if the merged quantity exceeds stock.
    pub fn add_line(&mut self, line: CartLine<'a>) -> Result<(), CartError> {
        let line_currency = line.unit_price().currency();

        if line_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                line.sku().to_string(),
                line_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.sku() == line.sku()) {
            let quantity = existing
                .quantity()
                .checked_add(line.quantity())
                .ok_or_else(|| CartLineError::Overflow(line.sku().to_string()))?;

            existing.set_quantity(quantity)?;

            debug!(sku = line.sku(), quantity, "merged cart line");

            return Ok(());
        }

        debug!(sku = line.sku(), quantity = line.quantity(), "added cart line");

        self.lines.push(line);

        Ok(())
    }

    /// Set the quantity of a line. A quantity of zero removes it.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the SKU is unknown or the quantity exceeds stock.
    pub fn set_quantity(&mut self, sku: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(sku).map(|_line| ());
        }

        self.lines
            .iter_mut()
            .find(|l| l.sku() == sku)
            .ok_or_else(|| CartError::UnknownSku(sku.to_string()))?
            .set_quantity(quantity)?;

        Ok(())
    }

    /// Remove a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownSku` if no line has the given SKU.
    pub fn remove(&mut self, sku: &str) -> Result<CartLine<'a>, CartError> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.sku() == sku)
            .ok_or_else(|| CartError::UnknownSku(sku.to_string()))?;

        Ok(self.lines.remove(idx))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or overflow error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.lines, CartLine::line_total)
    }

    /// Calculate the subtotal at original (pre-markdown) prices.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or overflow error.
    pub fn original_subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.lines, CartLine::original_line_total)
    }

    /// Get a line by SKU.
    pub fn line(&self, sku: &str) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|l| l.sku() == sku)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity())).sum()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{KES, USD};
    use testresult::TestResult;

    use super::*;

    fn line<'a>(sku: &str, price: i64, quantity: u32) -> Result<CartLine<'a>, CartLineError> {
        CartLine::new(sku, sku, Money::from_major(price, KES), quantity)
    }

    #[test]
    fn new_with_currency() {
        let cart = Cart::new(KES);

        assert_eq!(cart.currency(), KES);
        assert!(cart.is_empty());
    }

    #[test]
    fn with_lines_currency_mismatch_errors() -> TestResult {
        let lines = [
            line("BIKE", 45_000, 1)?,
            CartLine::new("LOCK", "Lock", Money::from_major(10, USD), 1)?,
        ];

        let result = Cart::with_lines(lines, KES);

        match result {
            Err(CartError::CurrencyMismatch(sku, line_currency, cart_currency)) => {
                assert_eq!(sku, "LOCK");
                assert_eq!(line_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, KES.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn subtotal_with_lines() -> TestResult {
        let cart = Cart::with_lines([line("BIKE", 45_000, 1)?, line("HLM", 2_500, 2)?], KES)?;

        assert_eq!(cart.subtotal()?, Money::from_major(50_000, KES));
        assert_eq!(cart.unit_count(), 3);

        Ok(())
    }

    #[test]
    fn subtotal_with_no_lines() -> TestResult {
        let cart = Cart::new(KES);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, KES));

        Ok(())
    }

    #[test]
    fn add_line_merges_same_sku() -> TestResult {
        let mut cart = Cart::new(KES);

        cart.add_line(line("HLM", 2_500, 1)?)?;
        cart.add_line(line("HLM", 2_500, 2)?)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line("HLM").map(CartLine::quantity), Some(3));

        Ok(())
    }

    #[test]
    fn add_line_merge_respects_stock() -> TestResult {
        let mut cart = Cart::new(KES);

        cart.add_line(line("HLM", 2_500, 2)?.with_stock(2)?)?;

        let result = cart.add_line(line("HLM", 2_500, 1)?);

        assert_eq!(
            result,
            Err(CartError::Line(CartLineError::ExceedsStock(
                "HLM".to_string(),
                3,
                2
            )))
        );
        assert_eq!(cart.line("HLM").map(CartLine::quantity), Some(2));

        Ok(())
    }

    #[test]
    fn set_quantity_zero_removes_line() -> TestResult {
        let mut cart = Cart::with_lines([line("BIKE", 45_000, 1)?, line("HLM", 2_500, 2)?], KES)?;

        cart.set_quantity("HLM", 0)?;

        assert_eq!(cart.len(), 1);
        assert!(cart.line("HLM").is_none());

        Ok(())
    }

    #[test]
    fn set_quantity_unknown_sku_errors() {
        let mut cart = Cart::new(KES);

        assert_eq!(
            cart.set_quantity("NOPE", 2),
            Err(CartError::UnknownSku("NOPE".to_string()))
        );
    }

    #[test]
    fn lines_keep_insertion_order() -> TestResult {
        let cart = Cart::with_lines(
            [line("C", 1, 1)?, line("A", 1, 1)?, line("B", 1, 1)?],
            KES,
        )?;

        let skus: Vec<&str> = cart.iter().map(CartLine::sku).collect();

        assert_eq!(skus, ["C", "A", "B"]);

        Ok(())
    }

    #[test]
    fn original_subtotal_uses_reference_prices() -> TestResult {
        let cart = Cart::with_lines(
            [
                line("BIKE", 45_000, 1)?.with_original_price(Money::from_major(52_000, KES))?,
                line("HLM", 2_500, 2)?,
            ],
            KES,
        )?;

        assert_eq!(cart.original_subtotal()?, Money::from_major(57_000, KES));

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::with_lines([line("BIKE", 45_000, 1)?], KES)?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal()?, Money::from_minor(0, KES));

        Ok(())
    }
}
