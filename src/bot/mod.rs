//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles commands and plain text messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats captions
//! - `renderer`: Sends or edits the catalog media message

pub mod callback_handler;
pub mod message_handler;
pub mod renderer;
pub mod ui_builder;

use std::path::PathBuf;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::api_client::HttpCatalogClient;
use crate::navigator::CatalogNavigator;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::{command_handler, message_handler, Command};

/// Navigator over the live catalog API
pub type Navigator = CatalogNavigator<HttpCatalogClient>;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct BotContext {
    pub navigator: Navigator,
    pub placeholder_image_path: Arc<PathBuf>,
}

impl BotContext {
    pub fn new(navigator: Navigator, placeholder_image_path: PathBuf) -> Self {
        Self {
            navigator,
            placeholder_image_path: Arc::new(placeholder_image_path),
        }
    }
}

/// Update routing: commands, other messages, callback queries
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let messages = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(dptree::endpoint(message_handler));

    dptree::entry()
        .branch(messages)
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}
