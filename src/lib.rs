//! # Catalog Telegram Bot
//!
//! A Telegram bot for browsing a product catalog served by a REST API:
//! categories, paginated product lists and product details, backed by a
//! short-lived in-memory cache.

pub mod api_client;
pub mod bot;
pub mod cache;
pub mod catalog_errors;
pub mod catalog_model;
pub mod config;
pub mod localization;
pub mod navigation;
pub mod navigator;
