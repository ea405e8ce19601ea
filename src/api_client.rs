//! # Catalog API Client Module
//!
//! HTTP client for the two upstream catalog endpoints. Product images arrive
//! as data-URI base64 strings and are decoded once per fetch.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::catalog_errors::CatalogError;
use crate::catalog_model::{Category, Product, ResourceKind};

/// Upstream request deadline
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything able to produce fresh catalog data
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch all products, with decoded images
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch all categories
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError>;
}

/// REST client for the upstream catalog API
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    products_url: String,
    categories_url: String,
}

impl HttpCatalogClient {
    /// Create a client with the default request timeout
    pub fn new(
        products_url: impl Into<String>,
        categories_url: impl Into<String>,
    ) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, products_url, categories_url))
    }

    /// Create a client around an already configured `reqwest::Client`
    pub fn with_client(
        client: reqwest::Client,
        products_url: impl Into<String>,
        categories_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            products_url: products_url.into(),
            categories_url: categories_url.into(),
        }
    }

    fn url_for(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Products => &self.products_url,
            ResourceKind::Categories => &self.categories_url,
        }
    }

    async fn get_records<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
    ) -> Result<Vec<T>, CatalogError> {
        let url = self.url_for(kind);
        info!(kind = %kind, url = %url, "Requesting catalog resource from upstream API");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CatalogError::Http { kind, source })?;

        let status = response.status();
        if !status.is_success() {
            error!(kind = %kind, status = %status, "Upstream API returned an error status");
            return Err(CatalogError::Status { kind, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| CatalogError::Http { kind, source })?;

        serde_json::from_slice(&body).map_err(|source| CatalogError::Decode { kind, source })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products: Vec<Product> = self.get_records(ResourceKind::Products).await?;
        decode_product_images(&mut products);
        Ok(products)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.get_records(ResourceKind::Categories).await
    }
}

/// Decode the first image of every product in place.
///
/// A product whose payload cannot be decoded keeps no image; the others are
/// unaffected. Returns the number of decoded images.
pub fn decode_product_images(products: &mut [Product]) -> usize {
    debug!(products = products.len(), "Decoding product images");

    let mut decoded = 0;
    for product in products.iter_mut() {
        match product.decode_image() {
            Ok(()) if product.image_bytes.is_some() => decoded += 1,
            Ok(()) => {}
            Err(e) => {
                error!(product_id = product.id, error = %e, "Failed to decode product image");
            }
        }
    }

    info!(decoded, total = products.len(), "Product images decoded");
    decoded
}
