//! In-memory catalog source shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use catalog_bot::api_client::CatalogSource;
use catalog_bot::catalog_errors::CatalogError;
use catalog_bot::catalog_model::{Category, Product, ResourceKind};

/// Catalog source serving fixed data and counting upstream calls
#[derive(Default)]
pub struct FakeCatalog {
    products: Mutex<Vec<Product>>,
    categories: Mutex<Vec<Category>>,
    product_calls: AtomicUsize,
    category_calls: AtomicUsize,
    failing: AtomicBool,
    latency: Option<Duration>,
}

impl FakeCatalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: Mutex::new(products),
            categories: Mutex::new(categories),
            ..Default::default()
        }
    }

    /// Every fetch sleeps for `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.lock().unwrap() = products;
    }

    async fn respond<T: Clone>(
        &self,
        kind: ResourceKind,
        data: &Mutex<Vec<T>>,
    ) -> Result<Vec<T>, CatalogError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Status {
                kind,
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(data.lock().unwrap().clone())
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(ResourceKind::Products, &self.products).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(ResourceKind::Categories, &self.categories).await
    }
}

pub fn product(id: i64, category: &str) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        category: category.to_string(),
        brand: "Bosch".to_string(),
        price: Decimal::new(1250, 2),
        stock: 3,
        seller: "Carfix".to_string(),
        images: Vec::new(),
        image_bytes: None,
    }
}

pub fn category(id: i64, name: &str, is_active: bool) -> Category {
    Category {
        id,
        name: name.to_string(),
        is_active,
    }
}
