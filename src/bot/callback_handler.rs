//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, MessageId};
use tracing::{debug, error, warn};

// Import localization
use crate::localization::t_lang;

// Import catalog types
use crate::catalog_errors::NavigationError;
use crate::navigation::NavigationToken;

use super::message_handler::send_catalog_unavailable;
use super::renderer::edit_view;
use super::ui_builder::build_view;
use super::BotContext;

/// How a button press ended, from the user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    Done,
    /// Product/category unavailable or malformed button data
    Failed,
}

/// Handle callback queries from the catalog keyboards
pub async fn callback_handler(bot: Bot, q: CallbackQuery, ctx: BotContext) -> Result<()> {
    let data = q.data.as_deref().unwrap_or("");
    let language_code = q.from.language_code.as_deref();
    debug!(user_id = %q.from.id, data, "Received callback query from user");

    let outcome = match &q.message {
        Some(msg) => navigate(&bot, msg.chat().id, msg.id(), data, &ctx, language_code).await,
        None => {
            warn!(user_id = %q.from.id, "Callback query without message");
            Ok(CallbackOutcome::Failed)
        }
    };

    if let Err(e) = &outcome {
        error!(user_id = %q.from.id, data, error = ?e, "Error processing callback");
    }

    // Answer the callback query to remove the loading state
    let answer = bot.answer_callback_query(q.id.clone());
    match alert_key(&outcome) {
        Some(key) => {
            answer
                .text(t_lang(key, language_code))
                .show_alert(true)
                .await?;
        }
        None => {
            answer.await?;
        }
    }

    Ok(())
}

/// Message key of the alert a query is answered with, if any.
/// A query can only be answered once, so this is the whole reply.
pub fn alert_key(outcome: &Result<CallbackOutcome>) -> Option<&'static str> {
    match outcome {
        Ok(CallbackOutcome::Done) => None,
        Ok(CallbackOutcome::Failed) => Some("callback-failed"),
        Err(_) => Some("callback-error"),
    }
}

/// Parse the button token and redraw the message it belongs to
pub async fn navigate(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    data: &str,
    ctx: &BotContext,
    language_code: Option<&str>,
) -> Result<CallbackOutcome> {
    let token: NavigationToken = match data.parse() {
        Ok(token) => token,
        Err(e) => {
            warn!(chat_id = %chat_id, data, error = %e, "Rejected malformed navigation token");
            return Ok(CallbackOutcome::Failed);
        }
    };

    match ctx.navigator.render(token).await {
        Ok(screen) => {
            let view = build_view(&screen, language_code);
            edit_view(bot, chat_id, message_id, &view, &ctx.placeholder_image_path).await?;
            Ok(CallbackOutcome::Done)
        }
        Err(NavigationError::Unavailable(e)) if token == NavigationToken::Categories => {
            warn!(chat_id = %chat_id, error = %e, "Catalog unavailable for category menu");
            send_catalog_unavailable(bot, chat_id, language_code).await?;
            Ok(CallbackOutcome::Done)
        }
        Err(e) => {
            warn!(chat_id = %chat_id, token = %token, error = %e, "Navigation failed");
            Ok(CallbackOutcome::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_key_per_outcome() {
        assert_eq!(alert_key(&Ok(CallbackOutcome::Done)), None);
        assert_eq!(
            alert_key(&Ok(CallbackOutcome::Failed)),
            Some("callback-failed")
        );
        assert_eq!(
            alert_key(&Err(anyhow::anyhow!("edit failed"))),
            Some("callback-error")
        );
    }
}
