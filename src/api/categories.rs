//! Category loading for product forms.

use tracing::warn;

use crate::api::{CatalogApi, models::Category};

/// Fetch categories, falling back to an empty list when the API fails.
///
/// Failures are logged and never retried; the form stays usable without a
/// category selector.
pub async fn load_categories<A: CatalogApi + ?Sized>(api: &A) -> Vec<Category> {
    match api.categories().await {
        Ok(categories) => categories,
        Err(error) => {
            warn!(%error, "Failed to load categories, continuing without them");

            Vec::new()
        }
    }
}
