//! # Catalog Cache Module
//!
//! Time-bounded cache in front of a [`CatalogSource`]. Each resource kind has
//! its own slot guarded by an async mutex that is held across the
//! check-fetch-store sequence, so concurrent requests on a stale slot trigger
//! a single upstream call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::api_client::CatalogSource;
use crate::catalog_errors::CatalogError;
use crate::catalog_model::{Category, Product, ResourceKind};

/// Default lifetime of a cache entry (15 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// One fetched snapshot and the instant it was fetched at
#[derive(Debug)]
struct CacheEntry<T> {
    data: Arc<Vec<T>>,
    fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

type Slot<T> = Mutex<Option<CacheEntry<T>>>;

/// Catalog cache wrapping an upstream source
pub struct CatalogCache<S> {
    source: S,
    ttl: Duration,
    products: Slot<Product>,
    categories: Slot<Category>,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            products: Mutex::new(None),
            categories: Mutex::new(None),
        }
    }

    pub fn with_default_ttl(source: S) -> Self {
        Self::new(source, DEFAULT_CACHE_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// All products, from cache when fresh
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        load(&self.products, ResourceKind::Products, self.ttl, || {
            self.source.fetch_products()
        })
        .await
    }

    /// All categories, from cache when fresh
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, CatalogError> {
        load(&self.categories, ResourceKind::Categories, self.ttl, || {
            self.source.fetch_categories()
        })
        .await
    }

    /// Find a product by id through the cached product list
    pub async fn product_by_id(&self, product_id: i64) -> Result<Option<Product>, CatalogError> {
        let products = self.products().await?;
        Ok(products.iter().find(|p| p.id == product_id).cloned())
    }
}

async fn load<T, F, Fut>(
    slot: &Slot<T>,
    kind: ResourceKind,
    ttl: Duration,
    fetch: F,
) -> Result<Arc<Vec<T>>, CatalogError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, CatalogError>>,
{
    let mut entry = slot.lock().await;

    if let Some(cached) = entry.as_ref().filter(|cached| cached.is_fresh(ttl)) {
        debug!(kind = %kind, "Using cached catalog data");
        return Ok(Arc::clone(&cached.data));
    }

    match fetch().await {
        Ok(records) => {
            let data = Arc::new(records);
            *entry = Some(CacheEntry {
                data: Arc::clone(&data),
                fetched_at: Instant::now(),
            });
            info!(kind = %kind, records = data.len(), "Cache updated");
            Ok(data)
        }
        Err(e) => {
            error!(kind = %kind, error = %e, "Failed to fetch catalog data from upstream API");
            Err(e)
        }
    }
}
