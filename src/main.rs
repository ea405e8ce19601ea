use anyhow::{Context, Result};
use axum::routing::get;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use catalog_bot::api_client::HttpCatalogClient;
use catalog_bot::bot::{schema, BotContext, Command};
use catalog_bot::cache::CatalogCache;
use catalog_bot::config::{ensure_placeholder_exists, HostingMode, Settings};
use catalog_bot::localization::init_localization;
use catalog_bot::navigator::CatalogNavigator;

fn init_logging(production: bool) {
    let default_filter = if production {
        "info,teloxide=info,reqwest=info,hyper=info"
    } else {
        "debug,teloxide=info,reqwest=info,hyper=info,hyper_util=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if production {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn health_check() -> &'static str {
    "🤖 Bot activo"
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let settings = Settings::from_env();
    init_logging(settings.as_ref().is_ok_and(Settings::is_production));

    info!("Starting catalog Telegram bot");

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "FATAL: invalid configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_placeholder_exists(&settings.placeholder_image_path) {
        error!(error = %e, "FATAL: placeholder image is required");
        std::process::exit(1);
    }

    init_localization()?;

    let client = HttpCatalogClient::new(&settings.products_url, &settings.categories_url)
        .context("failed to build HTTP client")?;
    let cache = Arc::new(CatalogCache::new(client, settings.cache_ttl));
    let ctx = BotContext::new(
        CatalogNavigator::new(cache),
        settings.placeholder_image_path.clone(),
    );

    let bot = Bot::new(&settings.bot_token);
    bot.set_my_commands(Command::bot_commands()).await?;

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build();

    match &settings.hosting {
        HostingMode::Production { webhook_url, .. } => {
            let addr = settings
                .listen_addr()
                .context("production mode without listen address")?;
            let url: reqwest::Url = format!("{}/webhook", webhook_url.trim_end_matches('/'))
                .parse()
                .context("WEBHOOK_URL is not a valid URL")?;

            info!(%addr, %url, "Starting bot in PRODUCTION mode with webhook");

            let (listener, stop_flag, router) =
                webhooks::axum_to_router(bot.clone(), webhooks::Options::new(addr, url)).await?;
            let app = router.route("/", get(health_check));

            let tcp_listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tokio::spawn(async move {
                if let Err(e) = axum::serve(tcp_listener, app)
                    .with_graceful_shutdown(stop_flag)
                    .await
                {
                    error!(error = %e, "Webhook server error");
                }
            });

            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
                )
                .await;
        }
        HostingMode::Development => {
            info!("Starting bot in DEVELOPMENT mode with long polling");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}
