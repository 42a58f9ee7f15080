//! Promo lookup table

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, PromoDiscount},
    promotions::{PromoCode, PromoRejection, normalize_code},
};

/// Static table of the promo codes a shop accepts.
#[derive(Debug, Clone)]
pub struct PromoTable {
    currency: &'static Currency,
    codes: FxHashMap<String, PromoCode>,
}

impl PromoTable {
    /// Create an empty table for the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            codes: FxHashMap::default(),
        }
    }

    /// The codes the shop runs out of the box.
    pub fn builtin(currency: &'static Currency) -> Self {
        let mut codes = FxHashMap::default();

        for promo in [
            PromoCode::new(
                "BIKE10",
                "10% off your order",
                PromoDiscount::Percentage(Percentage::from(Decimal::new(10, 2))),
            ),
            PromoCode::new(
                "WELCOME500",
                "500 off your first order",
                PromoDiscount::FixedAmount(Money::from_major(500, currency)),
            ),
            PromoCode::new(
                "BIKE2024",
                "15% off orders of 10,000 or more",
                PromoDiscount::Percentage(Percentage::from(Decimal::new(15, 2))),
            )
            .with_minimum_order_value(Money::from_major(10_000, currency)),
            PromoCode::new("FREESHIP", "Free delivery", PromoDiscount::FreeShipping),
        ] {
            codes.insert(promo.code().to_string(), promo);
        }

        Self { currency, codes }
    }

    /// Add a promo, replacing and returning any promo with the same code.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::CurrencyMismatch`] if a fixed amount or minimum
    /// order value is in a different currency to the table.
    pub fn insert(&mut self, promo: PromoCode) -> Result<Option<PromoCode>, DiscountError> {
        let fixed = match promo.discount() {
            PromoDiscount::FixedAmount(amount) => Some(amount),
            PromoDiscount::Percentage(_) | PromoDiscount::FreeShipping => None,
        };

        for amount in fixed.into_iter().chain(promo.minimum_order_value()) {
            if amount.currency() != self.currency {
                return Err(DiscountError::CurrencyMismatch(
                    amount.currency().iso_alpha_code,
                    self.currency.iso_alpha_code,
                ));
            }
        }

        Ok(self.codes.insert(promo.code().to_string(), promo))
    }

    /// Look up a promo by user-entered code.
    pub fn get(&self, code: &str) -> Option<&PromoCode> {
        self.codes.get(&normalize_code(code))
    }

    /// Look up a promo and check it against the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`PromoRejection`] if the code is empty or unknown, the
    /// subtotal is in another currency to the table, or the subtotal is below
    /// the promo's minimum order value.
    pub fn check(
        &self,
        code: &str,
        subtotal: &Money<'static, Currency>,
    ) -> Result<PromoCode, PromoRejection> {
        let code = normalize_code(code);

        if code.is_empty() {
            return Err(PromoRejection::EmptyCode);
        }

        if subtotal.currency() != self.currency {
            return Err(PromoRejection::CurrencyMismatch {
                code,
                expected: self.currency.iso_alpha_code,
                found: subtotal.currency().iso_alpha_code,
            });
        }

        let promo = self
            .codes
            .get(&code)
            .ok_or(PromoRejection::NotFound(code))?;

        promo.check_eligibility(subtotal)?;

        Ok(promo.clone())
    }

    /// Iterate over promos sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = &PromoCode> {
        let mut promos: Vec<&PromoCode> = self.codes.values().collect();

        promos.sort_by(|a, b| a.code().cmp(b.code()));
        promos.into_iter()
    }

    /// Number of promos in the table.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table has no promos.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Currency of fixed amounts and minimums.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{KES, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builtin_table_has_shop_codes() {
        let table = PromoTable::builtin(KES);
        let codes: Vec<&str> = table.iter().map(PromoCode::code).collect();

        assert_eq!(codes, ["BIKE10", "BIKE2024", "FREESHIP", "WELCOME500"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = PromoTable::builtin(KES);

        assert!(table.get("bike10").is_some());
        assert!(table.get("  Welcome500 ").is_some());
        assert!(table.get("BIKE11").is_none());
    }

    #[test]
    fn check_rejects_empty_and_unknown_codes() {
        let table = PromoTable::builtin(KES);
        let subtotal = Money::from_major(10_000, KES);

        assert!(matches!(
            table.check("   ", &subtotal),
            Err(PromoRejection::EmptyCode)
        ));
        assert!(matches!(
            table.check("nope", &subtotal),
            Err(PromoRejection::NotFound(code)) if code == "NOPE"
        ));
    }

    #[test]
    fn check_enforces_minimum_order_value() -> TestResult {
        let table = PromoTable::builtin(KES);

        assert!(matches!(
            table.check("BIKE2024", &Money::from_major(8_000, KES)),
            Err(PromoRejection::BelowMinimum { .. })
        ));

        let promo = table.check("BIKE2024", &Money::from_major(12_000, KES))?;

        assert_eq!(promo.code(), "BIKE2024");

        Ok(())
    }

    #[test]
    fn check_rejects_subtotal_in_other_currency() {
        let table = PromoTable::builtin(KES);

        for code in ["BIKE2024", "BIKE10"] {
            assert!(matches!(
                table.check(code, &Money::from_major(10_000, USD)),
                Err(PromoRejection::CurrencyMismatch { expected: "KES", found: "USD", .. })
            ));
        }
    }

    #[test]
    fn insert_replaces_existing_code() -> TestResult {
        let mut table = PromoTable::builtin(KES);

        let previous = table.insert(PromoCode::new(
            "bike10",
            "Now 20%",
            PromoDiscount::Percentage(Percentage::from(Decimal::new(20, 2))),
        ))?;

        assert_eq!(
            previous.as_ref().map(PromoCode::description),
            Some("10% off your order")
        );
        assert_eq!(
            table.get("BIKE10").map(PromoCode::description),
            Some("Now 20%")
        );

        Ok(())
    }

    #[test]
    fn insert_rejects_foreign_currency() {
        let mut table = PromoTable::new(KES);

        let result = table.insert(PromoCode::new(
            "DOLLAR",
            "5 off",
            PromoDiscount::FixedAmount(Money::from_major(5, USD)),
        ));

        assert!(matches!(result, Err(DiscountError::CurrencyMismatch(..))));
        assert!(table.is_empty());
    }
}
