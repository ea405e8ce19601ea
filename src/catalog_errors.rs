//! # Catalog Error Types Module
//!
//! Error types shared by the API client, the cache and the navigator.
//! Fetch failures are recovered at the bot boundary; only configuration
//! errors are fatal.

use thiserror::Error;

use crate::catalog_model::ResourceKind;

/// Failure to obtain a catalog resource from the upstream API
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (connection refused, timeout, TLS, ...)
    #[error("request for {kind} failed: {source}")]
    Http {
        kind: ResourceKind,
        #[source]
        source: reqwest::Error,
    },
    /// Upstream answered with a non-2xx status
    #[error("upstream returned {status} for {kind}")]
    Status {
        kind: ResourceKind,
        status: reqwest::StatusCode,
    },
    /// Body was not a JSON array of records
    #[error("invalid {kind} payload: {source}")]
    Decode {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to decode the embedded image of a single product
#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("image payload has no data URI prefix")]
    MissingPayload,
    #[error("invalid base64 image payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Malformed callback data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("empty navigation token")]
    Empty,
    #[error("unknown navigation command `{0}`")]
    UnknownCommand(String),
    #[error("navigation token `{0}` has an unexpected shape")]
    Malformed(String),
    #[error("invalid number `{value}` in navigation token")]
    InvalidNumber { value: String },
}

/// Failure to compute a catalog screen
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("product {product_id} not found")]
    ProductNotFound { product_id: i64 },
    #[error("page {page} is past the end of a {total}-product listing")]
    PageOutOfRange { page: usize, total: usize },
    #[error("catalog unavailable: {0}")]
    Unavailable(#[from] CatalogError),
}

/// Invalid or missing runtime configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
    #[error("placeholder image not found at {0}")]
    PlaceholderMissing(String),
}
