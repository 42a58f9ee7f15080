//! HTTP client for the catalog API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::api::{
    ApiError, CatalogApi,
    models::{Category, Product, ProductPayload},
};

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl CatalogClient {
    /// Create a new client for the API at `base_url`, e.g. `"https://api.oshocks.co.ke"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client reusing an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { base_url, http }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path such as `"categories"`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(request.send().await?).await?;
        let envelope: Envelope<T> = response.json().await?;

        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let categories: Vec<Category> = self.send(self.http.get(self.url("categories"))).await?;

        debug!(count = categories.len(), "Fetched categories");

        Ok(categories)
    }

    #[instrument(skip(self, token, payload), fields(name = %payload.name))]
    async fn create_product(
        &self,
        token: &str,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        let request = self
            .http
            .post(self.url("seller/products"))
            .bearer_auth(token)
            .json(payload);

        self.send(request).await
    }

    #[instrument(skip(self, token, payload), fields(name = %payload.name))]
    async fn update_product(
        &self,
        token: &str,
        id: u64,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        let request = self
            .http
            .put(self.url(&format!("seller/products/{id}")))
            .bearer_auth(token)
            .json(payload);

        self.send(request).await
    }
}

/// Response bodies arrive either bare or wrapped in `{"data": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        _ => ApiError::UnexpectedResponse { status, body },
    }
}
