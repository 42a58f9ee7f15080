//! Oshocks prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{ApiError, CatalogApi, CatalogClient, Category, ProductPayload, load_categories},
    basket::{Cart, CartError},
    config::PricingConfig,
    countdown::Countdown,
    discounts::{DiscountError, PromoDiscount},
    fixtures::{Fixture, FixtureError},
    items::{CartLine, CartLineError},
    pricing::{Fulfilment, OrderPricing, PricingError, calculate_order_pricing},
    promotions::{PromoCode, PromoRejection, PromoSession, PromoState, PromoTable, PromoValidator},
    receipt::{ReceiptError, write_receipt},
    sizing::{BikeKind, SizeRecommendation, SizingError, recommend_frame_size},
};
