//! Oshocks
//!
//! Order pricing for the Oshocks Junior Bike Shop: carts, promo codes, shipping
//! and VAT, plus frame sizing, deal countdowns and a client for the catalog API.

pub mod api;
pub mod basket;
pub mod config;
pub mod countdown;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod receipt;
pub mod sizing;
