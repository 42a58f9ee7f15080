//! Discounts
//!
//! Promo code discount kinds and the arithmetic shared by promotions and
//! VAT extraction.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A fixed discount is in a different currency to the order (discount, order).
    #[error("discount is in {0}, but order is in {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The benefit a promo code grants.
#[derive(Debug, Copy, Clone)]
pub enum PromoDiscount<'a> {
    /// Take a fraction off the subtotal (e.g., "10% off")
    Percentage(Percentage),

    /// Take a fixed amount off the subtotal (e.g., "KSh 500 off")
    FixedAmount(Money<'a, Currency>),

    /// Waive the shipping charge. The discount amount itself is zero.
    FreeShipping,
}

impl PromoDiscount<'_> {
    /// Whether this discount waives shipping.
    pub fn is_free_shipping(&self) -> bool {
        matches!(self, PromoDiscount::FreeShipping)
    }
}

/// Calculates the discount amount a promo grants against a subtotal.
///
/// Fixed amounts are returned as-is, even when larger than the subtotal.
///
/// # Errors
///
/// Returns an error if:
/// - a percentage calculation cannot be safely represented in minor units
///   (`DiscountError::PercentConversion`).
/// - a fixed amount is in another currency (`DiscountError::CurrencyMismatch`).
pub fn calculate_discount<'a>(
    discount: &PromoDiscount<'a>,
    subtotal: &Money<'a, Currency>,
) -> Result<Money<'a, Currency>, DiscountError> {
    let currency = subtotal.currency();

    match discount {
        PromoDiscount::Percentage(percent) => {
            let minor = percent_of_minor(percent, subtotal.to_minor_units())?;

            Ok(Money::from_minor(minor, currency))
        }
        PromoDiscount::FixedAmount(amount) => {
            if amount.currency() != currency {
                return Err(DiscountError::CurrencyMismatch(
                    amount.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            Ok(*amount)
        }
        PromoDiscount::FreeShipping => Ok(Money::from_minor(0, currency)),
    }
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns an error if the percentage calculation overflows or cannot be safely
/// represented (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Extract the tax component from a tax-inclusive amount in minor units.
///
/// Computes `gross × rate / (1 + rate)`, rounded half away from zero.
///
/// # Errors
///
/// Returns `DiscountError::PercentConversion` if the arithmetic overflows.
pub fn inclusive_tax_of_minor(rate: &Percentage, gross: i64) -> Result<i64, DiscountError> {
    let rate = (*rate) * Decimal::ONE;
    let gross = Decimal::from_i64(gross).ok_or(DiscountError::PercentConversion)?;

    let divisor = Decimal::ONE
        .checked_add(rate)
        .filter(|d| !d.is_zero())
        .ok_or(DiscountError::PercentConversion)?;

    gross
        .checked_mul(rate)
        .and_then(|v| v.checked_div(divisor))
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
