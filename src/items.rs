//! Cart lines

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors raised while building or updating a cart line.
#[derive(Debug, Error, PartialEq)]
pub enum CartLineError {
    /// Quantity must be at least one.
    #[error("quantity for {0} must be at least 1")]
    ZeroQuantity(String),

    /// Requested quantity is above the known stock level (sku, requested, stock).
    #[error("only {2} of {0} in stock, {1} requested")]
    ExceedsStock(String, u32, u32),

    /// The reference price is lower than the selling price.
    #[error("original price of {0} is below its unit price")]
    OriginalBelowUnit(String),

    /// Unit price is negative.
    #[error("unit price of {0} is negative")]
    NegativePrice(String),

    /// The unit and original prices are in different currencies.
    #[error("original price of {0} is in {1}, unit price is in {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Line total does not fit in minor units.
    #[error("line total of {0} overflowed")]
    Overflow(String),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One product entry in a cart.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine<'a> {
    sku: String,
    name: String,
    unit_price: Money<'a, Currency>,
    original_price: Option<Money<'a, Currency>>,
    quantity: u32,
    stock: Option<u32>,
}

impl<'a> CartLine<'a> {
    /// Creates a new cart line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartLineError`] if the quantity is zero or the price is negative.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<Self, CartLineError> {
        let sku = sku.into();

        if quantity == 0 {
            return Err(CartLineError::ZeroQuantity(sku));
        }

        if unit_price.to_minor_units() < 0 {
            return Err(CartLineError::NegativePrice(sku));
        }

        Ok(Self {
            sku,
            name: name.into(),
            unit_price,
            original_price: None,
            quantity,
            stock: None,
        })
    }

    /// Sets the pre-discount reference price.
    ///
    /// # Errors
    ///
    /// Returns a [`CartLineError`] if the original price is below the unit price
    /// or in another currency.
    pub fn with_original_price(
        mut self,
        original_price: Money<'a, Currency>,
    ) -> Result<Self, CartLineError> {
        let (original, unit) = (original_price.currency(), self.unit_price.currency());

        if original != unit {
            return Err(CartLineError::CurrencyMismatch(
                self.sku,
                original.iso_alpha_code,
                unit.iso_alpha_code,
            ));
        }

        if original_price.to_minor_units() < self.unit_price.to_minor_units() {
            return Err(CartLineError::OriginalBelowUnit(self.sku));
        }

        self.original_price = Some(original_price);

        Ok(self)
    }

    /// Sets the known stock level.
    ///
    /// # Errors
    ///
    /// Returns [`CartLineError::ExceedsStock`] if the current quantity is above `stock`.
    pub fn with_stock(mut self, stock: u32) -> Result<Self, CartLineError> {
        check_stock(&self.sku, self.quantity, Some(stock))?;

        self.stock = Some(stock);

        Ok(self)
    }

    /// Changes the quantity, re-checking stock.
    ///
    /// # Errors
    ///
    /// Returns a [`CartLineError`] if the quantity is zero or exceeds stock.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), CartLineError> {
        if quantity == 0 {
            return Err(CartLineError::ZeroQuantity(self.sku.clone()));
        }

        check_stock(&self.sku, quantity, self.stock)?;

        self.quantity = quantity;

        Ok(())
    }

    /// Product SKU
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Product display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selling price of a single unit
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Reference price before any markdown, if the product has one
    pub fn original_price(&self) -> Option<&Money<'a, Currency>> {
        self.original_price.as_ref()
    }

    /// Number of units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Known stock level
    pub fn stock(&self) -> Option<u32> {
        self.stock
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartLineError::Overflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, CartLineError> {
        self.times_quantity(&self.unit_price)
    }

    /// Amount saved against the original price across the whole line.
    ///
    /// # Errors
    ///
    /// Returns [`CartLineError::Overflow`] if the savings do not fit in minor units.
    pub fn line_savings(&self) -> Result<Money<'a, Currency>, CartLineError> {
        let Some(original) = self.original_price else {
            return Ok(Money::from_minor(0, self.unit_price.currency()));
        };

        let per_unit = original.sub(self.unit_price)?;

        self.times_quantity(&per_unit)
    }

    /// Original price multiplied by quantity, falling back to the unit price.
    ///
    /// # Errors
    ///
    /// Returns [`CartLineError::Overflow`] if the total does not fit in minor units.
    pub fn original_line_total(&self) -> Result<Money<'a, Currency>, CartLineError> {
        self.times_quantity(self.original_price.as_ref().unwrap_or(&self.unit_price))
    }

    fn times_quantity(
        &self,
        price: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, CartLineError> {
        let minor = price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or_else(|| CartLineError::Overflow(self.sku.clone()))?;

        Ok(Money::from_minor(minor, price.currency()))
    }
}

fn check_stock(sku: &str, quantity: u32, stock: Option<u32>) -> Result<(), CartLineError> {
    match stock {
        Some(stock) if quantity > stock => Err(CartLineError::ExceedsStock(
            sku.to_string(),
            quantity,
            stock,
        )),
        _ => Ok(()),
    }
}
