//! # Catalog Data Model
//!
//! Records returned by the upstream catalog API.
//!
//! - **Product**: one sellable item, optionally carrying a base64 image
//! - **Category**: a named group of products that can be switched off
//! - **ResourceKind**: which of the two upstream resources a value came from
//!
//! ## Usage
//!
//! ```rust
//! use catalog_bot::catalog_model::Product;
//!
//! let json = r#"{"id": 7, "name": "Filtro de aceite", "category": "Filtros",
//!     "brand": "Bosch", "price": "12.50", "stock": 4, "seller": "Carfix",
//!     "images": [{"imageData": "data:image/png;base64,aGVsbG8="}]}"#;
//! let mut product: Product = serde_json::from_str(json).unwrap();
//! product.decode_image().unwrap();
//! assert_eq!(product.image_bytes.as_deref(), Some(&b"hello"[..]));
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::catalog_errors::ImageDecodeError;

/// The two resources exposed by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Products,
    Categories,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Products => "products",
            ResourceKind::Categories => "categories",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One image record attached to a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Data-URI style base64 payload (`data:image/jpeg;base64,....`)
    #[serde(rename = "imageData", default)]
    pub image_data: Option<String>,
}

/// A product as listed by the upstream API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Name of the category the product belongs to
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub seller: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,

    /// Raw bytes decoded from the first image, filled in after a fetch
    #[serde(skip)]
    pub image_bytes: Option<Arc<[u8]>>,
}

impl Product {
    /// Payload of the first image, if it carries any data
    pub fn image_payload(&self) -> Option<&str> {
        self.images
            .first()
            .and_then(|image| image.image_data.as_deref())
            .filter(|data| !data.is_empty())
    }

    /// Decode the first image into `image_bytes`.
    ///
    /// Leaves `image_bytes` empty when the product has no image. On error
    /// `image_bytes` is cleared so the product falls back to the placeholder.
    pub fn decode_image(&mut self) -> Result<(), ImageDecodeError> {
        self.image_bytes = None;
        let Some(payload) = self.image_payload() else {
            return Ok(());
        };
        let bytes = decode_data_uri(payload)?;
        self.image_bytes = Some(Arc::from(bytes));
        Ok(())
    }
}

/// Decode the base64 part of a `prefix,payload` data URI
pub fn decode_data_uri(data: &str) -> Result<Vec<u8>, ImageDecodeError> {
    let encoded = data.split(',').nth(1).ok_or(ImageDecodeError::MissingPayload)?;
    let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(cleaned)?)
}

/// A product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Categories without the flag are active
    #[serde(default = "default_active", deserialize_with = "deserialize_flag")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Accepts `true`/`false` as well as the `0`/`1` integers some backends send
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Int(value)) => value != 0,
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialization_with_numeric_price() {
        let json = r#"{"id": 1, "name": "Bujía", "category": "Encendido", "brand": "NGK",
            "price": 15000, "stock": 10, "seller": "Carfix", "images": []}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.price, Decimal::from(15000));
        assert!(product.image_payload().is_none());
        assert!(product.image_bytes.is_none());
    }

    #[test]
    fn test_product_deserialization_with_string_price() {
        let json = r#"{"id": 2, "name": "Filtro", "price": "12.50"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.price.to_string(), "12.50");
        assert_eq!(product.brand, "");
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_decode_image_strips_data_uri_prefix() {
        let mut product: Product = serde_json::from_str(
            r#"{"id": 3, "name": "x", "images": [{"imageData": "data:image/jpeg;base64,AQID"}]}"#,
        )
        .unwrap();

        product.decode_image().unwrap();
        assert_eq!(product.image_bytes.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_decode_image_without_prefix_fails() {
        let mut product: Product = serde_json::from_str(
            r#"{"id": 4, "name": "x", "images": [{"imageData": "AQID"}]}"#,
        )
        .unwrap();

        assert!(matches!(
            product.decode_image(),
            Err(ImageDecodeError::MissingPayload)
        ));
        assert!(product.image_bytes.is_none());
    }

    #[test]
    fn test_decode_image_invalid_base64() {
        let result = decode_data_uri("data:image/png;base64,@@not-base64@@");
        assert!(matches!(result, Err(ImageDecodeError::Base64(_))));
    }

    #[test]
    fn test_empty_image_data_is_skipped() {
        let mut product: Product = serde_json::from_str(
            r#"{"id": 5, "name": "x", "images": [{"imageData": ""}]}"#,
        )
        .unwrap();

        assert!(product.decode_image().is_ok());
        assert!(product.image_bytes.is_none());
    }

    #[test]
    fn test_category_active_flag_variants() {
        let absent: Category = serde_json::from_str(r#"{"id": 1, "name": "A"}"#).unwrap();
        let as_int: Category =
            serde_json::from_str(r#"{"id": 2, "name": "B", "is_active": 0}"#).unwrap();
        let as_bool: Category =
            serde_json::from_str(r#"{"id": 3, "name": "C", "is_active": true}"#).unwrap();
        let as_null: Category =
            serde_json::from_str(r#"{"id": 4, "name": "D", "is_active": null}"#).unwrap();

        assert!(absent.is_active);
        assert!(!as_int.is_active);
        assert!(as_bool.is_active);
        assert!(!as_null.is_active);
    }

    #[test]
    fn test_resource_kind_keys() {
        assert_eq!(ResourceKind::Products.to_string(), "products");
        assert_eq!(ResourceKind::Categories.as_str(), "categories");
    }
}
