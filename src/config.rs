//! Pricing configuration
//!
//! The constants every pricing call site shares. Defaults match the shop's
//! published policy; a YAML file can override them.

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, KES},
};
use serde::Deserialize;

use crate::fixtures::{FixtureError, parse_percentage, parse_price};

/// Orders at or above this many shillings ship free.
pub const FREE_SHIPPING_THRESHOLD_KES: i64 = 5_000;

/// Flat delivery charge below the free shipping threshold.
pub const BASE_SHIPPING_COST_KES: i64 = 300;

/// Kenyan standard VAT rate, in hundredths.
pub const VAT_RATE_HUNDREDTHS: i64 = 16;

/// Constants used by the order pricing calculator.
#[derive(Debug, Clone, Copy)]
pub struct PricingConfig {
    /// Currency of every amount in the config
    pub currency: &'static Currency,

    /// Subtotal at or above which shipping is waived
    pub free_shipping_threshold: Money<'static, Currency>,

    /// Shipping charged below the threshold
    pub base_shipping_cost: Money<'static, Currency>,

    /// VAT rate already embedded in listed prices
    pub vat_rate: Percentage,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: KES,
            free_shipping_threshold: Money::from_major(FREE_SHIPPING_THRESHOLD_KES, KES),
            base_shipping_cost: Money::from_major(BASE_SHIPPING_COST_KES, KES),
            vat_rate: Percentage::from(Decimal::new(VAT_RATE_HUNDREDTHS, 2)),
        }
    }
}

/// Pricing config as written in YAML.
#[derive(Debug, Deserialize)]
pub struct PricingConfigFixture {
    /// Free shipping threshold (e.g., "5000 KES")
    pub free_shipping_threshold: String,

    /// Base shipping cost (e.g., "300 KES")
    pub base_shipping_cost: String,

    /// VAT rate (e.g., "16%")
    pub vat_rate: String,
}

impl TryFrom<PricingConfigFixture> for PricingConfig {
    type Error = FixtureError;

    fn try_from(fixture: PricingConfigFixture) -> Result<Self, Self::Error> {
        let (threshold, currency) = parse_price(&fixture.free_shipping_threshold)?;
        let (shipping, shipping_currency) = parse_price(&fixture.base_shipping_cost)?;

        if currency != shipping_currency {
            return Err(FixtureError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                shipping_currency.iso_alpha_code.to_string(),
            ));
        }

        Ok(Self {
            currency,
            free_shipping_threshold: Money::from_minor(threshold, currency),
            base_shipping_cost: Money::from_minor(shipping, currency),
            vat_rate: parse_percentage(&fixture.vat_rate)?,
        })
    }
}

impl PricingConfig {
    /// Load a pricing config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid amounts.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a pricing config from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or holds invalid amounts.
    pub fn from_yaml_str(contents: &str) -> Result<Self, FixtureError> {
        let fixture: PricingConfigFixture = serde_norway::from_str(contents)?;

        fixture.try_into()
    }
}
