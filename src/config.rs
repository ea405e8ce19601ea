//! # Bot Configuration Module
//!
//! Runtime settings read from the environment (a `.env` file is loaded first
//! by `main`).

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_TTL;
use crate::catalog_errors::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PLACEHOLDER_IMAGE_PATH: &str = "placeholder.jpg";

/// How updates reach the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostingMode {
    /// Webhook served by an embedded HTTP server
    Production { webhook_url: String, port: u16 },
    /// Long polling
    Development,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub bot_token: String,
    pub products_url: String,
    pub categories_url: String,
    pub hosting: HostingMode,
    pub placeholder_image_path: PathBuf,
    pub cache_ttl: Duration,
}

impl Settings {
    /// Load settings from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let bot_token = get("BOT_TOKEN")
            .or_else(|| get("TELEGRAM_BOT_TOKEN"))
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;
        let products_url = require("API_URL_PRODUCTS")?;
        let categories_url = require("API_URL_CATEGORIES")?;

        let hosting = if get("HOSTING").as_deref() == Some("production") {
            let port = match get("PORT") {
                Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "PORT",
                    value,
                })?,
                None => DEFAULT_PORT,
            };
            HostingMode::Production {
                webhook_url: require("WEBHOOK_URL")?,
                port,
            }
        } else {
            HostingMode::Development
        };

        let cache_ttl = match get("CACHE_TTL_SECS") {
            Some(value) => Duration::from_secs(value.trim().parse().map_err(|_| {
                ConfigError::Invalid {
                    name: "CACHE_TTL_SECS",
                    value,
                }
            })?),
            None => DEFAULT_CACHE_TTL,
        };

        let placeholder_image_path = get("PLACEHOLDER_IMAGE_PATH")
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE_PATH.to_string())
            .into();

        Ok(Self {
            bot_token,
            products_url,
            categories_url,
            hosting,
            placeholder_image_path,
            cache_ttl,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.hosting, HostingMode::Production { .. })
    }

    /// Address the webhook server listens on
    pub fn listen_addr(&self) -> Option<SocketAddr> {
        match self.hosting {
            HostingMode::Production { port, .. } => {
                Some(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
            }
            HostingMode::Development => None,
        }
    }
}

/// The bot cannot render any catalog view without the placeholder image
pub fn ensure_placeholder_exists(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::PlaceholderMissing(path.display().to_string()))
    }
}
