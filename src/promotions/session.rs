//! Promo session
//!
//! Tracks the single promo a shopper has applied during a session.
//!
//! ```text
//! NoPromo ──apply──▶ Validating ──ok──▶ Applied ──remove──▶ NoPromo
//!                         │
//!                         └──rejected──▶ Rejected ──dismiss──▶ NoPromo
//! ```

use rusty_money::{Money, iso::Currency};
use tracing::{info, instrument, warn};

use crate::promotions::{PromoCode, PromoRejection, PromoValidator, normalize_code};

/// Where the session is in the promo lifecycle.
#[derive(Debug, Clone, Default)]
pub enum PromoState {
    /// No promo applied
    #[default]
    NoPromo,

    /// A code is being validated
    Validating(String),

    /// A promo is applied to the order
    Applied(PromoCode),

    /// The last code entered was rejected; the message is on display
    Rejected {
        /// Normalised code that was entered
        code: String,
        /// Why it was rejected
        reason: PromoRejection,
    },
}

/// Promo state for one shopping session.
#[derive(Debug, Default)]
pub struct PromoSession {
    state: PromoState,
}

impl PromoSession {
    /// Create a session with no promo applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a code, replacing any promo already applied.
    ///
    /// The previous promo is cleared before validation starts, so a rejected
    /// code never leaves an earlier promo in place.
    ///
    /// # Errors
    ///
    /// Returns the [`PromoRejection`] if the validator refuses the code. The
    /// session is then in [`PromoState::Rejected`].
    #[instrument(skip(self, validator, subtotal), fields(subtotal = %subtotal))]
    pub async fn apply<V>(
        &mut self,
        validator: &V,
        code: &str,
        subtotal: Money<'static, Currency>,
    ) -> Result<PromoCode, PromoRejection>
    where
        V: PromoValidator + ?Sized,
    {
        if let Some(previous) = self.remove() {
            info!(code = previous.code(), "cleared previous promo");
        }

        let normalized = normalize_code(code);

        self.state = PromoState::Validating(normalized.clone());

        match validator.validate(&normalized, subtotal).await {
            Ok(promo) => {
                info!(code = promo.code(), "applied promo");

                self.state = PromoState::Applied(promo.clone());

                Ok(promo)
            }
            Err(reason) => {
                warn!(code = %normalized, %reason, "rejected promo");

                self.state = PromoState::Rejected {
                    code: normalized,
                    reason: reason.clone(),
                };

                Err(reason)
            }
        }
    }

    /// Remove the applied promo, returning it.
    pub fn remove(&mut self) -> Option<PromoCode> {
        match std::mem::take(&mut self.state) {
            PromoState::Applied(promo) => Some(promo),
            other @ (PromoState::NoPromo
            | PromoState::Validating(_)
            | PromoState::Rejected { .. }) => {
                self.state = other;
                None
            }
        }
    }

    /// Clear a rejection message, returning to [`PromoState::NoPromo`].
    pub fn dismiss(&mut self) -> Option<PromoRejection> {
        match std::mem::take(&mut self.state) {
            PromoState::Rejected { reason, .. } => Some(reason),
            other @ (PromoState::NoPromo | PromoState::Validating(_) | PromoState::Applied(_)) => {
                self.state = other;
                None
            }
        }
    }

    /// The applied promo, if any.
    pub fn applied(&self) -> Option<&PromoCode> {
        match &self.state {
            PromoState::Applied(promo) => Some(promo),
            PromoState::NoPromo | PromoState::Validating(_) | PromoState::Rejected { .. } => None,
        }
    }

    /// The rejection currently on display, if any.
    pub fn rejection(&self) -> Option<&PromoRejection> {
        match &self.state {
            PromoState::Rejected { reason, .. } => Some(reason),
            PromoState::NoPromo | PromoState::Validating(_) | PromoState::Applied(_) => None,
        }
    }

    /// Current state.
    pub fn state(&self) -> &PromoState {
        &self.state
    }
}
