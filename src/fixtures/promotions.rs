//! Promotion Fixtures

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    discounts::PromoDiscount,
    fixtures::{FixtureError, parse_currency, parse_percentage, parse_price},
    promotions::{PromoCode, PromoTable},
};

/// Wrapper for promotions in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// ISO code of the table currency
    pub currency: String,

    /// Map of promo code -> promotion fixture
    pub promotions: FxHashMap<String, PromotionFixture>,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Shopper-facing description
    #[serde(default)]
    pub description: String,

    /// Discount configuration
    pub discount: DiscountFixture,

    /// Minimum subtotal (e.g., "10000 KES")
    #[serde(default)]
    pub minimum_order_value: Option<String>,
}

/// Discount configuration from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountFixture {
    /// Percentage off the subtotal (e.g., "10%")
    Percentage {
        /// Percentage string
        value: String,
    },

    /// Fixed amount off the subtotal (e.g., "500 KES")
    FixedAmount {
        /// Price string
        value: String,
    },

    /// Shipping waived
    FreeShipping,
}

impl TryFrom<PromotionsFixture> for PromoTable {
    type Error = FixtureError;

    fn try_from(fixture: PromotionsFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;
        let mut table = PromoTable::new(currency);

        for (code, promotion) in fixture.promotions {
            table.insert(promotion.try_into_promo(&code, currency)?)?;
        }

        Ok(table)
    }
}

impl PromotionFixture {
    /// Convert to a [`PromoCode`]
    ///
    /// # Errors
    ///
    /// Returns an error if an amount or percentage is invalid, or an amount is
    /// not in the table currency.
    pub fn try_into_promo(
        self,
        code: &str,
        currency: &'static Currency,
    ) -> Result<PromoCode, FixtureError> {
        let discount = match self.discount {
            DiscountFixture::Percentage { value } => {
                PromoDiscount::Percentage(parse_percentage(&value)?)
            }
            DiscountFixture::FixedAmount { value } => {
                PromoDiscount::FixedAmount(parse_amount(&value, currency)?)
            }
            DiscountFixture::FreeShipping => PromoDiscount::FreeShipping,
        };

        let promo = PromoCode::new(code, self.description, discount);

        let Some(minimum) = self.minimum_order_value else {
            return Ok(promo);
        };

        Ok(promo.with_minimum_order_value(parse_amount(&minimum, currency)?))
    }
}

fn parse_amount(
    value: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor, found) = parse_price(value)?;

    if found != currency {
        return Err(FixtureError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            found.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor, currency))
}
