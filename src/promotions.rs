//! Promotions
//!
//! Promo codes, the lookup table they live in, and the session state that
//! tracks which one the shopper has applied.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::discounts::PromoDiscount;

pub mod session;
pub mod table;
pub mod validator;

pub use session::{PromoSession, PromoState};
pub use table::PromoTable;
pub use validator::{MockPromoValidator, PromoValidator};

/// Why a promo code could not be applied.
///
/// The `Display` text is shown to the shopper.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PromoRejection {
    /// Nothing was entered.
    #[error("Please enter a promo code")]
    EmptyCode,

    /// The code is not in the lookup table.
    #[error("Invalid promo code: {0}")]
    NotFound(String),

    /// The subtotal is below the promo's minimum order value.
    #[error("{code} requires a minimum order of {minimum}")]
    BelowMinimum {
        /// Normalised promo code
        code: String,
        /// Required minimum subtotal
        minimum: Money<'static, Currency>,
        /// Subtotal at the time of application
        subtotal: Money<'static, Currency>,
    },

    /// The subtotal is in a different currency to the promo.
    #[error("{code} cannot be used with an order in {found}, expected {expected}")]
    CurrencyMismatch {
        /// Normalised promo code
        code: String,
        /// Currency the promo is priced in
        expected: &'static str,
        /// Currency of the subtotal
        found: &'static str,
    },

    /// A remote validator could not be reached.
    #[error("Promo codes are unavailable right now: {0}")]
    Unavailable(String),
}

/// A promo code and the benefit it grants.
#[derive(Debug, Clone)]
pub struct PromoCode {
    code: String,
    description: String,
    discount: PromoDiscount<'static>,
    minimum_order_value: Option<Money<'static, Currency>>,
}

impl PromoCode {
    /// Create a promo code. The code is normalised to upper case.
    pub fn new(
        code: &str,
        description: impl Into<String>,
        discount: PromoDiscount<'static>,
    ) -> Self {
        Self {
            code: normalize_code(code),
            description: description.into(),
            discount,
            minimum_order_value: None,
        }
    }

    /// Require a minimum subtotal before this promo can be applied.
    #[must_use]
    pub fn with_minimum_order_value(mut self, minimum: Money<'static, Currency>) -> Self {
        self.minimum_order_value = Some(minimum);
        self
    }

    /// Normalised code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Shopper-facing description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Benefit granted
    pub fn discount(&self) -> &PromoDiscount<'static> {
        &self.discount
    }

    /// Minimum subtotal required at application time
    pub fn minimum_order_value(&self) -> Option<&Money<'static, Currency>> {
        self.minimum_order_value.as_ref()
    }

    /// Check the minimum order value against a subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PromoRejection::CurrencyMismatch`] if the subtotal is in
    /// another currency, or [`PromoRejection::BelowMinimum`] if it is too low.
    pub fn check_eligibility(
        &self,
        subtotal: &Money<'static, Currency>,
    ) -> Result<(), PromoRejection> {
        let Some(minimum) = self.minimum_order_value else {
            return Ok(());
        };

        if subtotal.currency() != minimum.currency() {
            return Err(PromoRejection::CurrencyMismatch {
                code: self.code.clone(),
                expected: minimum.currency().iso_alpha_code,
                found: subtotal.currency().iso_alpha_code,
            });
        }

        if subtotal.to_minor_units() < minimum.to_minor_units() {
            return Err(PromoRejection::BelowMinimum {
                code: self.code.clone(),
                minimum,
                subtotal: *subtotal,
            });
        }

        Ok(())
    }
}

/// Normalise user input into a lookup key.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
