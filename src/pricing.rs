//! Pricing
//!
//! The order pricing calculator shared by the cart summary and checkout.
//!
//! Prices are VAT-inclusive. The VAT component is extracted for display and
//! never added on top of the total.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    basket::Cart,
    config::PricingConfig,
    discounts::{DiscountError, calculate_discount, inclusive_tax_of_minor},
    items::{CartLine, CartLineError},
    promotions::PromoCode,
};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No lines were provided, so currency could not be determined.
    #[error("no lines provided; cannot determine currency")]
    NoItems,

    /// A line total could not be calculated.
    #[error(transparent)]
    Line(#[from] CartLineError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total price of a list of cart lines
///
/// `line_total` selects which per-line amount is summed.
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No lines were provided, so currency could not be determined.
/// - [`TotalPriceError::Line`]: A line total overflowed.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a, F>(
    lines: &[CartLine<'a>],
    line_total: F,
) -> Result<Money<'a, Currency>, TotalPriceError>
where
    F: Fn(&CartLine<'a>) -> Result<Money<'a, Currency>, CartLineError>,
{
    let first = lines.first().ok_or(TotalPriceError::NoItems)?;

    let total = lines.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, line| -> Result<_, TotalPriceError> { Ok(acc.add(line_total(line)?)?) },
    )?;

    Ok(total)
}

/// Errors raised by the order pricing calculator.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The cart and the pricing config use different currencies (cart, config).
    #[error("cart is in {0}, but pricing config is in {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Error calculating the cart subtotal.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Error calculating the promo discount or VAT.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fulfilment {
    /// Courier delivery to the customer's address
    #[default]
    Delivery,

    /// Collected from the shop; never charged shipping
    StorePickup,
}

/// The priced order. Derived on every cart change and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPricing<'a> {
    subtotal: Money<'a, Currency>,
    markdown: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    vat: Money<'a, Currency>,
    total: Money<'a, Currency>,
    amount_to_free_shipping: Money<'a, Currency>,
    shipping_waived: bool,
    promo_code: Option<String>,
}

impl<'a> OrderPricing<'a> {
    /// The result for an order with nothing to pay for.
    pub fn zero(currency: &'a Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal: zero,
            markdown: zero,
            discount: zero,
            shipping: zero,
            vat: zero,
            total: zero,
            amount_to_free_shipping: zero,
            shipping_waived: false,
            promo_code: None,
        }
    }

    /// Sum of line totals before discount and shipping
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Saved against original prices before any promo
    pub fn markdown(&self) -> Money<'a, Currency> {
        self.markdown
    }

    /// Markdown savings plus the promo discount
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the amounts cannot be added.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.markdown.add(self.discount)
    }

    /// Amount taken off by the applied promo, never more than the subtotal
    ///
    /// This is the applied amount; a fixed promo larger than the subtotal
    /// reports the subtotal, not its nominal value.
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Shipping charged
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// VAT contained in the discounted subtotal (informational)
    pub fn vat(&self) -> Money<'a, Currency> {
        self.vat
    }

    /// Amount payable
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Further spend needed before shipping becomes free
    pub fn amount_to_free_shipping(&self) -> Money<'a, Currency> {
        self.amount_to_free_shipping
    }

    /// Whether shipping was waived (threshold, free-shipping promo or pickup)
    pub fn shipping_waived(&self) -> bool {
        self.shipping_waived
    }

    /// Code of the promo that was priced in, if any
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Currency of every amount
    pub fn currency(&self) -> &'a Currency {
        self.total.currency()
    }
}

/// Price an order.
///
/// Promo eligibility (minimum order value) is checked when the promo is
/// applied, not here; a promo passed in is always priced.
///
/// # Errors
///
/// Returns a [`PricingError`] on currency mismatch or money arithmetic failure.
pub fn calculate_order_pricing<'a>(
    cart: &Cart<'a>,
    promo: Option<&PromoCode>,
    fulfilment: Fulfilment,
    config: &PricingConfig,
) -> Result<OrderPricing<'a>, PricingError> {
    let currency = cart.currency();

    if currency != config.currency {
        return Err(PricingError::CurrencyMismatch(
            currency.iso_alpha_code,
            config.currency.iso_alpha_code,
        ));
    }

    let subtotal = cart.subtotal()?;
    let subtotal_minor = subtotal.to_minor_units();

    if subtotal_minor == 0 {
        return Ok(OrderPricing::zero(currency));
    }

    let markdown = cart.original_subtotal()?.sub(subtotal)?;
    let threshold_minor = config.free_shipping_threshold.to_minor_units();

    let shipping_waived = fulfilment == Fulfilment::StorePickup
        || subtotal_minor >= threshold_minor
        || promo.is_some_and(|p| p.discount().is_free_shipping());

    let shipping_minor = if shipping_waived {
        0
    } else {
        config.base_shipping_cost.to_minor_units()
    };

    let discount_minor = match promo {
        Some(promo) => calculate_discount(promo.discount(), &subtotal)?
            .to_minor_units()
            .clamp(0, subtotal_minor),
        None => 0,
    };

    let net_minor = subtotal_minor - discount_minor;
    let vat_minor = inclusive_tax_of_minor(&config.vat_rate, net_minor)?;

    let total = Money::from_minor(net_minor, currency)
        .add(Money::from_minor(shipping_minor, currency))?;

    let pricing = OrderPricing {
        subtotal,
        markdown,
        discount: Money::from_minor(discount_minor, currency),
        shipping: Money::from_minor(shipping_minor, currency),
        vat: Money::from_minor(vat_minor, currency),
        total,
        amount_to_free_shipping: Money::from_minor(
            threshold_minor.saturating_sub(subtotal_minor).max(0),
            currency,
        ),
        shipping_waived,
        promo_code: promo.map(|p| p.code().to_string()),
    };

    debug!(
        subtotal = %pricing.subtotal,
        discount = %pricing.discount,
        shipping = %pricing.shipping,
        total = %pricing.total,
        promo = pricing.promo_code.as_deref(),
        "priced order"
    );

    Ok(pricing)
}
