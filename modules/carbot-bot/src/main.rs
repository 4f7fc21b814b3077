use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::OpenAi;
use autodev_client::AutoDevClient;
use carbot_core::{AutoDevSearch, BotDeps, Config, OpenAiTranslator};
use telegram::TelegramClient;

mod bot;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("carbot_core=info".parse()?)
                .add_directive("carbot_bot=info".parse()?),
        )
        .init();

    info!("Carbot starting...");

    // Load config
    let config = Config::from_env();

    // Wire the upstream clients behind the core's seams
    let ai = OpenAi::new(config.openai_api_key.clone(), config.openai_model.clone());
    let listings = AutoDevClient::new(config.auto_dev_api_key.clone());
    let tg = TelegramClient::new(config.telegram_bot_token.clone());

    let deps = BotDeps {
        translator: Arc::new(OpenAiTranslator::new(ai)),
        listings: Arc::new(AutoDevSearch::new(listings)),
        config,
    };

    bot::run(tg, deps).await
}
