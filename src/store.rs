use std::sync::Arc;

use moka::future::Cache;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::schemas::Category;

const CATEGORIES_KEY: &str = "categories";

/// Shared categories store: fetch once, reuse across views, refetch only
/// after an explicit [`clear`](CategoryStore::clear).
///
/// This is an injected service rather than an ambient singleton so tests can
/// construct and reset their own instance.
#[derive(Clone)]
pub struct CategoryStore {
    client: ApiClient,
    cache: Cache<&'static str, Arc<Vec<Category>>>,
}

impl CategoryStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cache: Cache::new(1),
        }
    }

    /// All categories in their server-defined sort order. Skips the fetch
    /// when the store is already populated.
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, ApiError> {
        if let Some(cached) = self.cache.get(CATEGORIES_KEY).await {
            debug!("categories served from store");
            return Ok(cached);
        }
        let fetched = self.client.categories().await?;
        debug!(total = fetched.total, "categories fetched");
        let categories = Arc::new(fetched.categories);
        self.cache.insert(CATEGORIES_KEY, categories.clone()).await;
        Ok(categories)
    }

    /// Look up one category by id from the shared list.
    pub async fn category(&self, id: i32) -> Result<Option<Category>, ApiError> {
        Ok(self
            .categories()
            .await?
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }

    /// Drop the cached list; the next access refetches.
    pub async fn clear(&self) {
        self.cache.invalidate(CATEGORIES_KEY).await;
    }
}
