//! Promo validation

use async_trait::async_trait;
use mockall::automock;
use rusty_money::{Money, iso::Currency};

use crate::promotions::{PromoCode, PromoRejection, PromoTable};

/// Decides whether a code can be applied to an order.
///
/// [`PromoTable`] validates against a static table; a backend-backed
/// implementation can be swapped in without changing the result contract.
#[automock]
#[async_trait]
pub trait PromoValidator: Send + Sync {
    /// Validate a user-entered code against the current subtotal.
    async fn validate(
        &self,
        code: &str,
        subtotal: Money<'static, Currency>,
    ) -> Result<PromoCode, PromoRejection>;
}

#[async_trait]
impl PromoValidator for PromoTable {
    async fn validate(
        &self,
        code: &str,
        subtotal: Money<'static, Currency>,
    ) -> Result<PromoCode, PromoRejection> {
        self.check(code, &subtotal)
    }
}
