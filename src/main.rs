use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;

use kemsu_assistant::bot::{self, DialogueController};
use kemsu_assistant::config::BotConfig;
use kemsu_assistant::dialogue::ScheduleDialogueState;
use kemsu_assistant::document_loader::DocumentLoader;
use kemsu_assistant::localization::LocalizationManager;
use kemsu_assistant::logging::init_logging;
use kemsu_assistant::news_scraper::NewsScraper;
use kemsu_assistant::news_service::NewsService;
use kemsu_assistant::schedule_catalog::ScheduleCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;

    // Initialize logging; the guard flushes the log file on shutdown
    let _log_guard = init_logging(&config.logging)?;

    info!(config = ?config, "Starting KemSU Assistant Telegram Bot");

    let catalog = ScheduleCatalog::builtin(&config.documents)?;
    let scraper = NewsScraper::new(config.news_url.clone(), config.request_timeout)?;
    let loader = DocumentLoader::new(config.request_timeout)?;
    let texts = LocalizationManager::new()?;

    let controller = Arc::new(DialogueController::new(
        catalog,
        NewsService::new(scraper),
        loader,
        texts,
        config.news_limit,
    ));

    let bot = Bot::new(config.telegram_token.clone());

    info!("Bot initialized, starting dispatcher");

    let handler = Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<ScheduleDialogueState>, ScheduleDialogueState>()
        .endpoint(bot::message_handler);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<ScheduleDialogueState>::new(),
            controller
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
