//! Catalog API models.

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Oldest model year accepted for a listing.
pub const EARLIEST_MODEL_YEAR: i16 = 1950;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id
    pub id: u64,

    /// Display name
    pub name: String,
}

/// What kind of product a listing is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Complete bicycle
    Bicycle,
    /// Component or spare part
    Part,
    /// Helmets, lights, locks and the like
    Accessory,
}

/// Condition of the item being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCondition {
    /// Never used
    New,
    /// Previously owned
    Used,
    /// Restored by the seller
    Refurbished,
}

/// Body of a product create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    /// Product name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Product type
    #[serde(rename = "type")]
    pub kind: ProductType,

    /// Category id, from [`Category::id`]
    pub category_id: u64,

    /// Brand id, if the brand is known
    #[serde(default)]
    pub brand_id: Option<u64>,

    /// Price in whole shillings
    pub price: u64,

    /// Units in stock
    pub stock_quantity: u32,

    /// Item condition
    pub condition: ProductCondition,

    /// Model year
    #[serde(default)]
    pub year: Option<i16>,

    /// Free-form specifications (frame material, gears, wheel size...)
    #[serde(default)]
    pub specifications: FxHashMap<String, String>,
}

impl ProductPayload {
    /// Check the payload before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPayload`] if the name is blank, the price is
    /// zero, or the model year is implausible for `today`.
    pub fn validate(&self, today: Date) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidPayload("name is required".to_string()));
        }

        if self.price == 0 {
            return Err(ApiError::InvalidPayload(
                "price must be greater than zero".to_string(),
            ));
        }

        if let Some(year) = self.year {
            let latest = today.year() + 1;

            if !(EARLIEST_MODEL_YEAR..=latest).contains(&year) {
                return Err(ApiError::InvalidPayload(format!(
                    "year {year} is outside {EARLIEST_MODEL_YEAR}-{latest}"
                )));
            }
        }

        Ok(())
    }
}

/// A product as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Product id
    pub id: u64,

    /// Product name
    pub name: String,

    /// Price in whole shillings
    pub price: u64,

    /// Units in stock
    #[serde(default)]
    pub stock_quantity: u32,

    /// Category id
    #[serde(default)]
    pub category_id: Option<u64>,
}
