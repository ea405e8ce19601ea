//! Renderer module: puts catalog views on screen.
//!
//! Views replace the current media message in place; only the first menu is
//! sent as a new photo message.

use anyhow::{Context, Result};
use std::path::Path;
use teloxide::prelude::*;
use teloxide::types::{InputFile, InputMedia, InputMediaPhoto, MessageId, ParseMode};
use tracing::{debug, warn};

use super::ui_builder::{CatalogView, ViewPhoto};

/// Read the placeholder for one send/edit call; the file is closed once read
async fn placeholder_file(placeholder: &Path) -> Result<InputFile> {
    let bytes = tokio::fs::read(placeholder)
        .await
        .with_context(|| format!("failed to read placeholder image {}", placeholder.display()))?;
    Ok(InputFile::memory(bytes).file_name("placeholder.jpg"))
}

async fn photo_file(photo: &ViewPhoto, placeholder: &Path) -> Result<Option<InputFile>> {
    match photo {
        ViewPhoto::Product(bytes) => Ok(Some(
            InputFile::memory(bytes.to_vec()).file_name("product.jpg"),
        )),
        ViewPhoto::Placeholder => placeholder_file(placeholder).await.map(Some),
        ViewPhoto::Unchanged => Ok(None),
    }
}

/// Replace the media message `message_id` with `view`.
///
/// Telegram rejections (for instance "message is not modified") are logged
/// and swallowed; only a missing placeholder image is reported.
pub async fn edit_view(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    view: &CatalogView,
    placeholder: &Path,
) -> Result<()> {
    let result = match photo_file(&view.photo, placeholder).await? {
        Some(file) => {
            let media = InputMedia::Photo(
                InputMediaPhoto::new(file)
                    .caption(view.caption.clone())
                    .parse_mode(ParseMode::Html),
            );
            bot.edit_message_media(chat_id, message_id, media)
                .reply_markup(view.keyboard.clone())
                .await
                .map(|_| ())
        }
        None => bot
            .edit_message_caption(chat_id, message_id)
            .caption(view.caption.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(view.keyboard.clone())
            .await
            .map(|_| ()),
    };

    match result {
        Ok(()) => debug!(chat_id = %chat_id, message_id = message_id.0, "Catalog view updated"),
        Err(e) => warn!(
            chat_id = %chat_id,
            message_id = message_id.0,
            error = %e,
            "Could not edit catalog message (possibly unchanged)"
        ),
    }
    Ok(())
}

/// Send `view` as a new photo message
pub async fn send_view(
    bot: &Bot,
    chat_id: ChatId,
    view: &CatalogView,
    placeholder: &Path,
) -> Result<Message> {
    let file = match photo_file(&view.photo, placeholder).await? {
        Some(file) => file,
        None => placeholder_file(placeholder).await?,
    };

    let message = bot
        .send_photo(chat_id, file)
        .caption(view.caption.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(view.keyboard.clone())
        .await?;

    debug!(chat_id = %chat_id, message_id = message.id.0, "Catalog view sent");
    Ok(message)
}
