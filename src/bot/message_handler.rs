//! Message Handler module for processing commands and plain text messages

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

// Import localization
use crate::localization::t_lang;

use super::renderer::send_view;
use super::ui_builder::{build_view, welcome_message};
use super::BotContext;

/// Commands understood by the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos disponibles:")]
pub enum Command {
    #[command(description = "Iniciar el bot")]
    Start,
    #[command(description = "Ver el catálogo de productos")]
    Catalogo,
    #[command(description = "Mostrar ayuda")]
    Help,
}

fn language_code(msg: &Message) -> Option<&str> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.as_deref())
}

pub async fn command_handler(bot: Bot, msg: Message, cmd: Command, ctx: BotContext) -> Result<()> {
    let language_code = language_code(&msg);
    debug!(user_id = %msg.chat.id, command = ?cmd, "Received command from user");

    match cmd {
        Command::Start | Command::Help => {
            bot.send_message(msg.chat.id, welcome_message(language_code))
                .parse_mode(ParseMode::Html)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
        Command::Catalogo => send_catalog_menu(&bot, msg.chat.id, &ctx, language_code).await?,
    }
    Ok(())
}

/// Anything that is not a known command gets a pointer to /catalogo
pub async fn message_handler(bot: Bot, msg: Message) -> Result<()> {
    debug!(user_id = %msg.chat.id, "Received non-command message from user");
    bot.send_message(msg.chat.id, t_lang("text-hint", language_code(&msg)))
        .await?;
    Ok(())
}

/// Send the category menu as a new photo message
pub async fn send_catalog_menu(
    bot: &Bot,
    chat_id: ChatId,
    ctx: &BotContext,
    language_code: Option<&str>,
) -> Result<()> {
    match ctx.navigator.category_menu().await {
        Ok(screen) => {
            let view = build_view(&screen, language_code);
            send_view(bot, chat_id, &view, &ctx.placeholder_image_path).await?;
            info!(chat_id = %chat_id, "Catalog menu sent");
        }
        Err(e) => {
            warn!(chat_id = %chat_id, error = %e, "Catalog unavailable for category menu");
            send_catalog_unavailable(bot, chat_id, language_code).await?;
        }
    }
    Ok(())
}

pub async fn send_catalog_unavailable(
    bot: &Bot,
    chat_id: ChatId,
    language_code: Option<&str>,
) -> Result<()> {
    bot.send_message(chat_id, t_lang("catalog-unavailable", language_code))
        .await?;
    Ok(())
}
