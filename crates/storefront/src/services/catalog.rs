//! Catalog service.
//!
//! Wraps the product repository with a short-lived in-process cache so
//! the landing page does not hit the database on every request. Staff
//! edits land within the cache TTL; anything that must be exact
//! (checkout stock checks) goes through the database directly.

use std::sync::Arc;

use moka::future::Cache;
use sqlx::PgPool;

use crate::db::{ProductRepository, RepositoryError};
use crate::models::Product;

/// Cached product listing keyed by a unit key (the whole catalog).
pub type CatalogCache = Cache<(), Arc<Vec<Product>>>;

/// How long a cached catalog listing stays fresh.
pub const CATALOG_TTL_SECS: u64 = 30;

/// Build the catalog cache.
#[must_use]
pub fn create_catalog_cache() -> CatalogCache {
    Cache::builder()
        .max_capacity(1)
        .time_to_live(std::time::Duration::from_secs(CATALOG_TTL_SECS))
        .build()
}

/// Catalog service.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
    cache: &'a CatalogCache,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, cache: &'a CatalogCache) -> Self {
        Self {
            products: ProductRepository::new(pool),
            cache,
        }
    }

    /// List the full catalog, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the listing query fails on a
    /// cache miss.
    pub async fn list(&self) -> Result<Arc<Vec<Product>>, RepositoryError> {
        if let Some(cached) = self.cache.get(&()).await {
            return Ok(cached);
        }
        let products = Arc::new(self.products.list_all().await?);
        self.cache.insert((), Arc::clone(&products)).await;
        Ok(products)
    }

    /// Search the catalog by name. Searches bypass the cache.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        self.products.search(query).await
    }
}

/// Drop the cached listing so the next request re-reads the database.
///
/// Called after writes the storefront makes itself (checkout decrements
/// stock). Admin-side edits still land within the TTL.
pub async fn invalidate(cache: &CatalogCache) {
    cache.invalidate(&()).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_drops_cached_listing() {
        let cache = create_catalog_cache();
        cache.insert((), Arc::new(Vec::new())).await;
        assert!(cache.get(&()).await.is_some());

        invalidate(&cache).await;
        assert!(cache.get(&()).await.is_none());
    }
}
