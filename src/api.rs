//! Catalog API
//!
//! Client side of the shop's REST API: category listing and seller product
//! creation and updates.

use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use thiserror::Error;

pub mod categories;
pub mod client;
pub mod models;

pub use categories::load_categories;
pub use client::CatalogClient;
pub use models::{Category, Product, ProductCondition, ProductPayload, ProductType};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The bearer token was missing, expired or rejected.
    #[error("unauthorized: the seller token was rejected")]
    Unauthorized,

    /// The API returned a non-2xx response.
    #[error("unexpected response ({status}): {body}")]
    UnexpectedResponse {
        /// Response status
        status: StatusCode,
        /// Response body text, possibly empty
        body: String,
    },

    /// The payload failed validation before it was sent.
    #[error("invalid product: {0}")]
    InvalidPayload(String),
}

/// Operations against the catalog API.
#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Lists product categories.
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Creates a seller product.
    async fn create_product(
        &self,
        token: &str,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError>;

    /// Replaces a seller product.
    async fn update_product(
        &self,
        token: &str,
        id: u64,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError>;
}
