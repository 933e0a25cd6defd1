//! # Refugee Help Bot Main Entry Point
//!
//! Initializes logging, loads configuration and the guidebook, builds the
//! search index and the reminder scheduler, registers the command menu and
//! runs the Telegram dispatcher next to the health server.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use refugee_help_bot::bot::commands::command_menu;
use refugee_help_bot::bot::handlers::BotHandler;
use refugee_help_bot::bot::router::CommandRouter;
use refugee_help_bot::bot::transport::{TelegramTransport, Transport};
use refugee_help_bot::config::{Config, UpdateMode};
use refugee_help_bot::content::{ContentIndex, Guidebook};
use refugee_help_bot::services::health::HealthService;
use refugee_help_bot::services::reminder::{ReminderScheduler, ReminderSettings};
use refugee_help_bot::services::search::KnowledgeSearch;
use refugee_help_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "refugee_help_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Refugee Help Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Mode: {:?}, Reminder interval: {}s, HTTP Port: {}",
        config.mode,
        config.reminder_interval.as_secs(),
        config.http_port
    );

    // Content is required before any update is served
    info!("Loading guidebook from {}", config.guidebook_path.display());
    let guidebook = Arc::new(Guidebook::load(&config.guidebook_path)?);
    let index = Arc::new(ContentIndex::from_guidebook(&guidebook));
    let search = KnowledgeSearch::new(index.clone());

    let bot = Bot::new(&config.telegram_bot_token);
    let transport: Arc<dyn Transport> = Arc::new(TelegramTransport::new(bot.clone()));

    let scheduler = Arc::new(ReminderScheduler::new(
        transport.clone(),
        ReminderSettings::new(config.reminder_interval, config.reminder_message.clone()),
    ));

    let router = Arc::new(CommandRouter::new(
        transport.clone(),
        scheduler.clone(),
        search,
        guidebook,
        config.thumb_url.clone(),
    ));
    let handler = BotHandler::new(router);

    if let Err(e) = transport.register_commands(command_menu()).await {
        tracing::warn!("Failed to register command menu: {}", e);
    } else {
        log_system_event("Command menu registered", None);
    }

    let health_service = HealthService::new(scheduler.clone(), index);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler.schema())
        .enable_ctrlc_handler()
        .build();

    let bot_task = match config.mode {
        UpdateMode::Polling => {
            log_system_event("Using long polling", None);
            tokio::spawn(async move {
                dispatcher.dispatch().await;
            })
        }
        UpdateMode::Webhook => {
            let url = config
                .webhook_url()
                .ok_or_else(|| anyhow::anyhow!("APP_NAME must be set in webhook mode"))?
                .parse::<url::Url>()?;
            let addr = SocketAddr::from(([0, 0, 0, 0], config.webhook_port));
            log_system_event("Using webhook", Some(&format!("listening on {addr}")));

            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url)).await?;
            tokio::spawn(async move {
                dispatcher
                    .dispatch_with_listener(
                        listener,
                        LoggingErrorHandler::with_custom_text("An error from the update listener"),
                    )
                    .await;
            })
        }
    };

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    scheduler.shutdown().await;

    info!("Application stopped");
    Ok(())
}
