//! # Catalog Navigator Module
//!
//! Turns a [`NavigationToken`] into a [`Screen`]: the category menu, one page
//! of a product listing, or a product detail. Screens are recomputed on every
//! request from cached catalog data; nothing is stored between requests.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::api_client::CatalogSource;
use crate::cache::CatalogCache;
use crate::catalog_errors::NavigationError;
use crate::catalog_model::{Category, Product};
use crate::navigation::NavigationToken;

/// Products shown per listing page
pub const PRODUCTS_PER_PAGE: usize = 8;

/// Heading of a product listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTitle {
    AllProducts,
    Category(String),
    /// The token named a category id the API does not know
    UnknownCategory,
}

/// One page of a (possibly filtered) product listing
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub title: ListTitle,
    /// Zero-based page index
    pub page: usize,
    /// Size of the filtered listing, all pages included
    pub total: usize,
    pub products: Vec<Product>,
    pub previous: Option<NavigationToken>,
    pub next: Option<NavigationToken>,
}

impl ProductPage {
    /// Nothing matched the filter at all
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// A product with its neighbours in the full product ordering
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub previous: Option<NavigationToken>,
    pub next: Option<NavigationToken>,
}

/// Everything needed to draw one catalog view
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Active categories that have products; empty means "nothing to show"
    CategoryMenu { categories: Vec<Category> },
    ProductList(ProductPage),
    ProductDetail(ProductDetail),
}

/// Stateless catalog browser backed by a shared cache
pub struct CatalogNavigator<S> {
    cache: Arc<CatalogCache<S>>,
}

impl<S> Clone for CatalogNavigator<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: CatalogSource> CatalogNavigator<S> {
    pub fn new(cache: Arc<CatalogCache<S>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &CatalogCache<S> {
        &self.cache
    }

    /// Compute the screen a token points to
    pub async fn render(&self, token: NavigationToken) -> Result<Screen, NavigationError> {
        debug!(token = %token, "Rendering catalog screen");
        match token {
            NavigationToken::Categories => self.category_menu().await,
            NavigationToken::AllProducts { page } => {
                self.product_list(None, page).await.map(Screen::ProductList)
            }
            NavigationToken::Category { category_id, page } => self
                .product_list(Some(category_id), page)
                .await
                .map(Screen::ProductList),
            NavigationToken::Product { product_id } => self
                .product_detail(product_id)
                .await
                .map(Screen::ProductDetail),
        }
    }

    /// Active categories that have at least one product, in upstream order
    pub async fn category_menu(&self) -> Result<Screen, NavigationError> {
        let categories = self.cache.categories().await?;
        let products = self.cache.products().await?;

        let categories = menu_categories(&categories, &products);
        debug!(categories = categories.len(), "Category menu computed");
        Ok(Screen::CategoryMenu { categories })
    }

    /// One page of all products, or of the products in `category_id`
    pub async fn product_list(
        &self,
        category_id: Option<i64>,
        page: usize,
    ) -> Result<ProductPage, NavigationError> {
        let products = self.cache.products().await?;

        let (title, filtered): (ListTitle, Vec<&Product>) = match category_id {
            None => (ListTitle::AllProducts, products.iter().collect()),
            Some(category_id) => {
                let categories = self.cache.categories().await?;
                match categories.iter().find(|c| c.id == category_id) {
                    Some(category) => (
                        ListTitle::Category(category.name.clone()),
                        filter_by_category(&products, &category.name),
                    ),
                    None => {
                        warn!(category_id, "Unknown category requested");
                        (ListTitle::UnknownCategory, Vec::new())
                    }
                }
            }
        };

        if is_past_end(filtered.len(), page) {
            warn!(page, total = filtered.len(), "Requested page out of range");
            return Err(NavigationError::PageOutOfRange {
                page,
                total: filtered.len(),
            });
        }

        let listing = match category_id {
            Some(category_id) => NavigationToken::Category {
                category_id,
                page: 0,
            },
            None => NavigationToken::AllProducts { page: 0 },
        };

        Ok(paginate(title, listing, &filtered, page))
    }

    /// A single product with full-list previous/next neighbours
    pub async fn product_detail(&self, product_id: i64) -> Result<ProductDetail, NavigationError> {
        let products = self.cache.products().await?;

        let Some(index) = products.iter().position(|p| p.id == product_id) else {
            warn!(product_id, "Requested product not found");
            return Err(NavigationError::ProductNotFound { product_id });
        };

        let previous = index
            .checked_sub(1)
            .and_then(|i| products.get(i))
            .map(|p| NavigationToken::Product { product_id: p.id });
        let next = products
            .get(index + 1)
            .map(|p| NavigationToken::Product { product_id: p.id });

        Ok(ProductDetail {
            product: products[index].clone(),
            previous,
            next,
        })
    }
}

/// Categories that are active and own at least one product
pub fn menu_categories(categories: &[Category], products: &[Product]) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| c.is_active && products.iter().any(|p| p.category == c.name))
        .cloned()
        .collect()
}

/// Products whose category name equals `category_name`, order preserved
pub fn filter_by_category<'a>(products: &'a [Product], category_name: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category == category_name)
        .collect()
}

/// A non-empty listing has no products on `page`
pub fn is_past_end(total: usize, page: usize) -> bool {
    total > 0 && page.saturating_mul(PRODUCTS_PER_PAGE) >= total
}

/// Slice page `page` out of `filtered`, with links built from `listing`
pub fn paginate(
    title: ListTitle,
    listing: NavigationToken,
    filtered: &[&Product],
    page: usize,
) -> ProductPage {
    let total = filtered.len();
    if total == 0 {
        return ProductPage {
            title,
            page,
            total,
            products: Vec::new(),
            previous: None,
            next: None,
        };
    }

    let start = page.saturating_mul(PRODUCTS_PER_PAGE);
    let end = start.saturating_add(PRODUCTS_PER_PAGE);
    let products = filtered
        .iter()
        .skip(start)
        .take(PRODUCTS_PER_PAGE)
        .map(|p| (*p).clone())
        .collect();

    ProductPage {
        title,
        page,
        total,
        products,
        previous: (page > 0).then(|| listing.with_page(page - 1)),
        next: (end < total).then(|| listing.with_page(page + 1)),
    }
}
